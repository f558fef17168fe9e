//! mernfinity - interactive deploy helper for MERN-stack projects
//!
//! mernfinity automates the usual release chores of a two-directory MERN
//! project: build the React frontend into the backend's public directory,
//! commit and push the project to GitHub, and generate a Render blueprint.
//! Last-used choices are remembered between runs and offered as defaults.

pub mod blueprint;
pub mod commands;
pub mod envfile;
pub mod error;
pub mod exec;
pub mod fsops;
pub mod git;
pub mod history;
pub mod prompt;
pub mod state;
pub mod ui;

// Re-exports for convenience
pub use blueprint::{Blueprint, ServiceDescriptor};
pub use envfile::EnvSet;
pub use error::{DeployError, DeployResult};
pub use git::{classify_create_failure, classify_push_failure, GitRepo};
pub use history::{FsHistoryStore, HistoryStore, MemoryHistoryStore, RenderHistory, RepoHistory};
pub use prompt::{Prompter, ScriptedPrompter, TerminalPrompter, Validation};
pub use state::{detect_layout, ProjectLayout};
