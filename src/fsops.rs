//! Filesystem helpers for publishing build output.

use std::path::Path;

use crate::error::DeployResult;

/// Remove `dir` recursively if present, then recreate it empty.
pub fn reset_dir(dir: &Path) -> DeployResult<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Recursively copy the contents of `src` into `dst`. `dst` must exist.
pub fn copy_dir_contents(src: &Path, dst: &Path) -> DeployResult<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            std::fs::create_dir_all(&target)?;
            copy_dir_contents(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reset_dir_clears_existing_contents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("public");
        std::fs::create_dir_all(target.join("old")).unwrap();
        std::fs::write(target.join("old").join("stale.js"), "stale").unwrap();

        reset_dir(&target).unwrap();

        assert!(target.is_dir());
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn test_reset_dir_creates_missing_dir() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("public");

        reset_dir(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_copy_dir_contents_recurses() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("dist");
        let dst = dir.path().join("public");
        std::fs::create_dir_all(src.join("assets")).unwrap();
        std::fs::write(src.join("index.html"), "<html>").unwrap();
        std::fs::write(src.join("assets").join("app.js"), "js").unwrap();
        std::fs::create_dir_all(&dst).unwrap();

        copy_dir_contents(&src, &dst).unwrap();

        assert_eq!(
            std::fs::read_to_string(dst.join("index.html")).unwrap(),
            "<html>"
        );
        assert_eq!(
            std::fs::read_to_string(dst.join("assets").join("app.js")).unwrap(),
            "js"
        );
    }
}
