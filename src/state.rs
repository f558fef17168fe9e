//! Project layout detection for the interactive menu.

use std::path::{Path, PathBuf};

const FRONTEND_CANDIDATES: &[&str] = &["client", "frontend", "web"];

/// What a quick look at the working directory found.
#[derive(Debug, Clone, Default)]
pub struct ProjectLayout {
    /// First conventional frontend directory present, if any.
    pub frontend_dir: Option<PathBuf>,
    /// `package.json` at the root (the backend manifest).
    pub has_manifest: bool,
    pub has_env_file: bool,
    pub has_repo: bool,
}

pub fn detect_layout(cwd: &Path) -> ProjectLayout {
    let frontend_dir = FRONTEND_CANDIDATES
        .iter()
        .map(|name| cwd.join(name))
        .find(|dir| dir.join("package.json").is_file());

    ProjectLayout {
        frontend_dir,
        has_manifest: cwd.join("package.json").is_file(),
        has_env_file: cwd.join(".env").is_file(),
        has_repo: cwd.join(".git").exists(),
    }
}

impl ProjectLayout {
    /// Default offered for the frontend-directory prompt.
    pub fn frontend_default(&self) -> String {
        match &self.frontend_dir {
            Some(dir) => dir
                .file_name()
                .map(|name| format!("./{}", name.to_string_lossy()))
                .unwrap_or_else(|| "./client".to_string()),
            None => "./client".to_string(),
        }
    }

    /// One-line description for the menu greeting.
    pub fn summary(&self) -> String {
        let mut found = Vec::new();
        if let Some(dir) = &self.frontend_dir {
            if let Some(name) = dir.file_name() {
                found.push(format!("{}/ frontend", name.to_string_lossy()));
            }
        }
        if self.has_manifest {
            found.push("package.json".to_string());
        }
        if self.has_env_file {
            found.push(".env".to_string());
        }
        if self.has_repo {
            found.push("git repository".to_string());
        }

        if found.is_empty() {
            "No MERN project layout detected".to_string()
        } else {
            format!("Found {}", found.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_detect_empty_dir() {
        let dir = tempdir().unwrap();
        let layout = detect_layout(dir.path());

        assert!(layout.frontend_dir.is_none());
        assert!(!layout.has_manifest);
        assert_eq!(layout.frontend_default(), "./client");
        assert_eq!(layout.summary(), "No MERN project layout detected");
    }

    #[test]
    fn test_detect_conventional_layout() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("client")).unwrap();
        std::fs::write(dir.path().join("client").join("package.json"), "{}").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::write(dir.path().join(".env"), "PORT=3000").unwrap();

        let layout = detect_layout(dir.path());

        assert!(layout.frontend_dir.is_some());
        assert_eq!(layout.frontend_default(), "./client");
        assert!(layout.has_manifest);
        assert!(layout.has_env_file);
        assert!(!layout.has_repo);
        assert_eq!(
            layout.summary(),
            "Found client/ frontend, package.json, .env"
        );
    }

    #[test]
    fn test_frontend_dir_requires_manifest() {
        let dir = tempdir().unwrap();
        // A bare directory without package.json is not treated as the
        // frontend.
        std::fs::create_dir_all(dir.path().join("client")).unwrap();

        let layout = detect_layout(dir.path());
        assert!(layout.frontend_dir.is_none());
    }
}
