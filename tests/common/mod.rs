//! Shared helpers for flow tests: temp project directories with a real
//! git repository and a bare "origin" to push into.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run git in `cwd`, asserting success, and return trimmed stdout.
pub fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("git is available");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repository with a local identity so commits work
/// regardless of the machine's global git configuration.
pub fn init_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "user.email", "test@example.com"]);
}

/// Create a bare repository to serve as the push target.
pub fn bare_remote() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "--bare"]);
    let url = dir.path().to_string_lossy().into_owned();
    (dir, url)
}

/// Branch names present in a (bare) repository.
pub fn remote_branches(remote: &Path) -> Vec<String> {
    git(
        remote,
        &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
    )
    .lines()
    .map(|line| line.to_string())
    .collect()
}

/// Whether a merged git identity is already visible from `dir` (e.g. the
/// developer's global config). Flow tests prepend scripted identity
/// answers only when it is not.
pub fn identity_configured(dir: &Path) -> bool {
    let configured = |key: &str| {
        Command::new("git")
            .args(["config", "--get", key])
            .current_dir(dir)
            .output()
            .map(|out| out.status.success() && !out.stdout.is_empty())
            .unwrap_or(false)
    };
    configured("user.name") && configured("user.email")
}
