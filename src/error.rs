//! Error types for mernfinity
//!
//! Uses `thiserror` for library errors; the binary boundary wraps these
//! in `anyhow`.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for deploy operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for deploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// External tool could not be started at all (missing from PATH)
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External tool ran and exited non-zero
    #[error("`{command}` exited with {status}{}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: Option<String>,
    },

    /// Home directory could not be resolved for the preference files
    #[error("could not determine user home directory")]
    HomeDirUnavailable,

    /// Directory expected by a flow step is missing
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Scripted prompter received a question it cannot answer
    #[error("scripted answer mismatch at prompt '{prompt}': {reason}")]
    ScriptedAnswer { prompt: String, reason: String },

    /// Interactive prompt error
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Env file parsing error
    #[error("env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

fn stderr_suffix(stderr: &Option<String>) -> String {
    match stderr {
        Some(text) if !text.trim().is_empty() => format!(": {}", text.trim()),
        _ => String::new(),
    }
}
