//! Git and GitHub operations.
//!
//! Thin wrappers over the `git` and `gh` command-line tools, plus the
//! classification of the two failure modes the push flow recovers from:
//! a hosting-side repository that already exists, and a push with no
//! matching local ref.

use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};
use crate::exec;

/// Outcome classification for a failed `git push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushFailure {
    /// The local branch has no matching ref; retry as `HEAD:<branch>`.
    MissingRef,
    Other,
}

/// Classify a failed push from its stderr. Git reports a branch with no
/// matching local ref as `error: src refspec <name> does not match any`
/// (older versions: "no matching ref").
pub fn classify_push_failure(stderr: &str) -> PushFailure {
    if stderr.contains("src refspec") || stderr.contains("no matching ref") {
        PushFailure::MissingRef
    } else {
        PushFailure::Other
    }
}

/// Outcome classification for a failed `gh repo create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFailure {
    /// The repository already exists on the host; fall back to pointing
    /// `origin` at it and force-pushing.
    AlreadyExists,
    Other,
}

pub fn classify_create_failure(stderr: &str) -> CreateFailure {
    if stderr.contains("already exists") {
        CreateFailure::AlreadyExists
    } else {
        CreateFailure::Other
    }
}

/// A local git repository rooted at a working directory.
pub struct GitRepo {
    workdir: PathBuf,
}

impl GitRepo {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn git(&self, args: &[&str]) -> DeployResult<()> {
        exec::run_capture("git", args, Some(&self.workdir)).map(|_| ())
    }

    fn git_query(&self, args: &[&str]) -> Option<String> {
        exec::run_capture("git", args, Some(&self.workdir))
            .ok()
            .filter(|out| !out.is_empty())
    }

    pub fn is_initialized(&self) -> bool {
        self.workdir.join(".git").exists()
    }

    pub fn init(&self) -> DeployResult<()> {
        self.git(&["init"])
    }

    pub fn config_get(&self, key: &str) -> Option<String> {
        self.git_query(&["config", "--get", key])
    }

    /// Whether a user identity is available (local or global config).
    pub fn has_identity(&self) -> bool {
        self.config_get("user.name").is_some() && self.config_get("user.email").is_some()
    }

    /// Set name and email in the repository-local config.
    pub fn set_identity(&self, name: &str, email: &str) -> DeployResult<()> {
        self.git(&["config", "user.name", name])?;
        self.git(&["config", "user.email", email])
    }

    pub fn remote_url(&self) -> Option<String> {
        self.config_get("remote.origin.url")
    }

    /// Point `origin` at `url`, adding the remote when it does not exist
    /// yet.
    pub fn set_remote(&self, url: &str) -> DeployResult<()> {
        if self.remote_url().is_some() {
            self.git(&["remote", "set-url", "origin", url])
        } else {
            self.git(&["remote", "add", "origin", url])
        }
    }

    /// Current branch name. `None` when the repository has no commits yet.
    pub fn current_branch(&self) -> Option<String> {
        self.git_query(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Whether the working tree has tracked or untracked pending changes.
    pub fn has_pending_changes(&self) -> DeployResult<bool> {
        let status = exec::run_capture("git", &["status", "--porcelain"], Some(&self.workdir))?;
        Ok(!status.is_empty())
    }

    pub fn stage_all(&self) -> DeployResult<()> {
        self.git(&["add", "."])
    }

    pub fn commit(&self, message: &str) -> DeployResult<()> {
        self.git(&["commit", "-m", message])
    }

    /// Create-or-reset `branch` and switch to it.
    pub fn switch_branch(&self, branch: &str) -> DeployResult<()> {
        self.git(&["checkout", "-B", branch])
    }

    pub fn push(&self, branch: &str) -> DeployResult<()> {
        exec::run_classified("git", &["push", "-u", "origin", branch], Some(&self.workdir))
    }

    /// Push the current head onto `branch` explicitly.
    pub fn push_head_to(&self, branch: &str) -> DeployResult<()> {
        let refspec = format!("HEAD:{branch}");
        exec::run_classified("git", &["push", "-u", "origin", &refspec], Some(&self.workdir))
    }

    pub fn push_force(&self, branch: &str) -> DeployResult<()> {
        exec::run_classified(
            "git",
            &["push", "-u", "origin", branch, "--force"],
            Some(&self.workdir),
        )
    }

    /// Push `branch`, retrying exactly once as `HEAD:<branch>` when the
    /// failure is a missing local ref. The retry's result is final; any
    /// other failure propagates unchanged.
    pub fn push_with_fallback(&self, branch: &str) -> DeployResult<()> {
        match self.push(branch) {
            Err(DeployError::CommandFailed { ref stderr, .. })
                if classify_push_failure(stderr.as_deref().unwrap_or(""))
                    == PushFailure::MissingRef =>
            {
                self.push_head_to(branch)
            }
            other => other,
        }
    }
}

/// Create a GitHub repository with `gh repo create`, wiring it up as
/// `origin` and pushing in one step.
pub fn create_github_repo(workdir: &Path, name: &str, description: &str) -> DeployResult<()> {
    exec::run_classified(
        "gh",
        &[
            "repo",
            "create",
            name,
            "--public",
            "--description",
            description,
            "--source",
            ".",
            "--remote",
            "origin",
            "--push",
        ],
        Some(workdir),
    )
}

/// URL a repository created as `name` ends up at.
pub fn derived_repo_url(name: &str) -> String {
    format!("https://github.com/{name}.git")
}
