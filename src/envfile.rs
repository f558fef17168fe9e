//! Environment-variable sets and `.env` import.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DeployResult;

/// Ordered mapping of environment-variable names to values.
///
/// Keys are unique; re-inserting an existing key overwrites its value in
/// place, keeping the position of the first insertion. The deploy flow
/// assembles one of these additively from the `.env` file, the last-used
/// set and manual entry, in the order the user opts into each source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSet {
    entries: Vec<(String, String)>,
}

impl EnvSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Add every entry of `other`, overwriting values for keys already
    /// present.
    pub fn extend_from(&mut self, other: &EnvSet) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for EnvSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EnvSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnvSetVisitor;

        impl<'de> Visitor<'de> for EnvSetVisitor {
            type Value = EnvSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of environment variables")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<EnvSet, A::Error> {
                let mut set = EnvSet::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    set.insert(key, value);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(EnvSetVisitor)
    }
}

/// Read a `KEY=VALUE` env file into an `EnvSet`, preserving file order.
pub fn load_env_file(path: &Path) -> DeployResult<EnvSet> {
    let mut set = EnvSet::new();
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        set.insert(key, value);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut set = EnvSet::new();
        set.insert("A", "1");
        set.insert("B", "2");
        set.insert("C", "3");

        let keys: Vec<&str> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_reinsert_overwrites_in_place() {
        let mut set = EnvSet::new();
        set.insert("A", "1");
        set.insert("B", "2");
        set.insert("A", "3");

        assert_eq!(set.get("A"), Some("3"));
        assert_eq!(set.len(), 2);
        let keys: Vec<&str> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_extend_is_additive() {
        let mut imported = EnvSet::new();
        imported.insert("A", "1");

        let mut manual = EnvSet::new();
        manual.insert("B", "2");

        let mut merged = EnvSet::new();
        merged.extend_from(&imported);
        merged.extend_from(&manual);

        assert_eq!(merged.get("A"), Some("1"));
        assert_eq!(merged.get("B"), Some("2"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut set = EnvSet::new();
        set.insert("MONGO_URI", "mongodb://localhost/app");
        set.insert("PORT", "3000");

        let json = serde_json::to_string(&set).unwrap();
        let back: EnvSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_load_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "# comment\nPORT=3000\nMONGO_URI=mongodb://localhost\n").unwrap();

        let set = load_env_file(&path).unwrap();
        assert_eq!(set.get("PORT"), Some("3000"));
        assert_eq!(set.get("MONGO_URI"), Some("mongodb://localhost"));
        let keys: Vec<&str> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["PORT", "MONGO_URI"]);
    }

    #[test]
    fn test_load_env_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(&dir.path().join(".env")).is_err());
    }

    proptest! {
        /// Replaying any insert sequence yields unique keys in first-seen
        /// order, each holding the last value written.
        #[test]
        fn prop_insert_model(ops in proptest::collection::vec(("[A-E]", "[a-z]{0,4}"), 0..32)) {
            let mut set = EnvSet::new();
            let mut model: Vec<(String, String)> = Vec::new();

            for (key, value) in &ops {
                set.insert(key.clone(), value.clone());
                match model.iter_mut().find(|(k, _)| k == key) {
                    Some(entry) => entry.1 = value.clone(),
                    None => model.push((key.clone(), value.clone())),
                }
            }

            let got: Vec<(String, String)> =
                set.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
            prop_assert_eq!(got, model);
        }
    }
}
