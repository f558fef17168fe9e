//! Publish the project to GitHub.
//!
//! One linear pass over repository setup: initialize, ensure an identity,
//! bootstrap the ignore file, resolve remote and branch, commit pending
//! work, then push. Two recovery paths exist: a hosting-side repository
//! that already exists (point `origin` at it and force-push) and a push
//! with no matching local ref (retry once as `HEAD:<branch>`).

use std::path::Path;

use crate::error::{DeployError, DeployResult};
use crate::git::{self, CreateFailure, GitRepo};
use crate::history::{HistoryStore, RepoHistory};
use crate::prompt::{Prompter, Validation};
use crate::ui;

const DEFAULT_BRANCH: &str = "main";
const DEFAULT_COMMIT_MESSAGE: &str = "Update";
const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";
const DEFAULT_REPO_DESCRIPTION: &str = "My awesome MERN project";

const DEFAULT_IGNORE_FILE: &str = "node_modules/\n\
.env\n\
.DS_Store\n\
dist/\n\
build/\n\
*.log\n\
.env.local\n\
.env.development.local\n\
.env.test.local\n\
.env.production.local\n\
npm-debug.log*\n\
yarn-debug.log*\n\
yarn-error.log*\n";

/// Where the push should go.
enum RemoteTarget {
    /// Create a repository on GitHub first.
    New { name: String, description: String },
    /// Push to an already-known URL.
    Url(String),
}

/// Run the flow, catching its own errors at the boundary: a failed push
/// is reported, not propagated.
pub fn execute(cwd: &Path, prompter: &mut dyn Prompter, store: &dyn HistoryStore) {
    if let Err(err) = run(cwd, prompter, store) {
        ui::failure("GitHub push failed", &err);
    }
}

pub fn run(cwd: &Path, prompter: &mut dyn Prompter, store: &dyn HistoryStore) -> DeployResult<()> {
    ui::heading("Push to GitHub");

    let repo = GitRepo::new(cwd);
    if !repo.is_initialized() {
        repo.init()?;
        ui::success("Initialized empty Git repository");
    }
    ensure_identity(&repo, prompter)?;
    ensure_ignore_file(cwd)?;

    let history = store.load_repo();
    let current_url = repo.remote_url();
    let remote = resolve_remote(prompter, current_url.as_deref(), &history)?;

    // Branch detection is only meaningful once a commit exists.
    let mut current_branch = repo.current_branch();
    if current_branch.is_none() {
        repo.stage_all()?;
        repo.commit(INITIAL_COMMIT_MESSAGE)?;
        ui::success("Created initial commit");
        current_branch = repo.current_branch();
    }

    let branch = resolve_branch(prompter, current_branch.as_deref(), &history)?;

    commit_pending(&repo, prompter)?;

    if current_branch.as_deref() != Some(branch.as_str()) {
        repo.switch_branch(&branch)?;
        ui::success(&format!("Switched to branch '{branch}'"));
    }

    let (final_url, push_result) = match &remote {
        RemoteTarget::New { name, description } => {
            let url = git::derived_repo_url(name);
            let result = push_new_repository(cwd, &repo, name, description, &branch);
            (url, result)
        }
        RemoteTarget::Url(url) => {
            let result = push_existing(&repo, url, current_url.as_deref(), &branch);
            (url.clone(), result)
        }
    };

    // The target is remembered even when the push failed, so the next run
    // offers it as the default.
    let saved = store.save_repo(RepoHistory {
        last_used_repo: Some(final_url),
        last_used_branch: Some(branch),
    });
    if let Err(err) = saved {
        ui::warn(&format!("Could not save repository history: {err}"));
    }

    push_result
}

fn ensure_identity(repo: &GitRepo, prompter: &mut dyn Prompter) -> DeployResult<()> {
    if repo.has_identity() {
        return Ok(());
    }
    let name = prompter.input("Git user name", None, Validation::NonEmpty)?;
    let email = prompter.input("Git email", None, Validation::NonEmpty)?;
    repo.set_identity(&name, &email)?;
    ui::success("Git identity configured");
    Ok(())
}

fn ensure_ignore_file(cwd: &Path) -> DeployResult<()> {
    let path = cwd.join(".gitignore");
    if path.exists() {
        return Ok(());
    }
    std::fs::write(path, DEFAULT_IGNORE_FILE)?;
    ui::success("Created .gitignore file");
    Ok(())
}

fn resolve_remote(
    prompter: &mut dyn Prompter,
    current: Option<&str>,
    history: &RepoHistory,
) -> DeployResult<RemoteTarget> {
    #[derive(Clone, Copy)]
    enum Choice {
        Current,
        Last,
        New,
        Existing,
    }

    let mut items = Vec::new();
    let mut choices = Vec::new();

    if let Some(url) = current {
        items.push(format!("Continue with current repository ({url})"));
        choices.push(Choice::Current);
    }
    if let Some(last) = history
        .last_used_repo
        .as_deref()
        .filter(|last| Some(*last) != current)
    {
        items.push(format!("Use last repository ({last})"));
        choices.push(Choice::Last);
    }
    items.push("Create new repository".to_string());
    choices.push(Choice::New);
    items.push("Use existing repository".to_string());
    choices.push(Choice::Existing);

    // Default to the current remote when there is one, otherwise to
    // creating a new repository.
    let default = if current.is_some() { 0 } else { items.len() - 2 };
    let picked = prompter.select("Repository setup", &items, default)?;

    match choices[picked] {
        Choice::Current => Ok(RemoteTarget::Url(current.unwrap_or_default().to_string())),
        Choice::Last => Ok(RemoteTarget::Url(
            history.last_used_repo.clone().unwrap_or_default(),
        )),
        Choice::Existing => {
            let url = prompter.input("Repository URL", None, Validation::NonEmpty)?;
            Ok(RemoteTarget::Url(url.trim().to_string()))
        }
        Choice::New => {
            let name = prompter.input("New repository name", None, Validation::NonEmpty)?;
            let description = prompter.input(
                "Repository description (optional)",
                Some(DEFAULT_REPO_DESCRIPTION),
                Validation::None,
            )?;
            Ok(RemoteTarget::New {
                name: name.trim().to_string(),
                description,
            })
        }
    }
}

fn resolve_branch(
    prompter: &mut dyn Prompter,
    current: Option<&str>,
    history: &RepoHistory,
) -> DeployResult<String> {
    #[derive(Clone, Copy)]
    enum Choice {
        Current,
        Last,
        New,
    }

    let mut items = Vec::new();
    let mut choices = Vec::new();

    if let Some(branch) = current {
        items.push(format!("Continue with current branch ({branch})"));
        choices.push(Choice::Current);
    }
    if let Some(last) = history
        .last_used_branch
        .as_deref()
        .filter(|last| Some(*last) != current)
    {
        items.push(format!("Use last branch ({last})"));
        choices.push(Choice::Last);
    }
    items.push("Create/switch to a different branch".to_string());
    choices.push(Choice::New);

    let picked = prompter.select("Branch setup", &items, 0)?;

    match choices[picked] {
        Choice::Current => Ok(current.unwrap_or(DEFAULT_BRANCH).to_string()),
        Choice::Last => Ok(history
            .last_used_branch
            .clone()
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string())),
        Choice::New => {
            let branch =
                prompter.input("Branch name", Some(DEFAULT_BRANCH), Validation::NonEmpty)?;
            Ok(branch.trim().to_string())
        }
    }
}

fn commit_pending(repo: &GitRepo, prompter: &mut dyn Prompter) -> DeployResult<()> {
    if !repo.has_pending_changes()? {
        return Ok(());
    }
    let message = prompter.input(
        "Commit message",
        Some(DEFAULT_COMMIT_MESSAGE),
        Validation::NonEmpty,
    )?;
    repo.stage_all()?;
    repo.commit(&message)?;
    ui::success("Changes committed");
    Ok(())
}

fn push_new_repository(
    cwd: &Path,
    repo: &GitRepo,
    name: &str,
    description: &str,
    branch: &str,
) -> DeployResult<()> {
    match git::create_github_repo(cwd, name, description) {
        Ok(()) => {
            ui::success("Repository created and pushed");
            Ok(())
        }
        Err(DeployError::CommandFailed { ref stderr, .. })
            if git::classify_create_failure(stderr.as_deref().unwrap_or(""))
                == CreateFailure::AlreadyExists =>
        {
            ui::info("Repository exists, updating remote...");
            repo.set_remote(&git::derived_repo_url(name))?;
            repo.push_force(branch)?;
            ui::success("Changes pushed");
            Ok(())
        }
        Err(other) => Err(other),
    }
}

fn push_existing(
    repo: &GitRepo,
    url: &str,
    current_url: Option<&str>,
    branch: &str,
) -> DeployResult<()> {
    if current_url != Some(url) {
        repo.set_remote(url)?;
    }
    repo.push_with_fallback(branch)?;
    ui::success("Changes pushed");
    Ok(())
}
