//! Structured invocation of external command-line tools.
//!
//! Every subprocess call goes through this module as a program plus an
//! argument list; user input is never interpolated into a shell string.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{DeployError, DeployResult};

/// Short label identifying a command in error messages ("git push").
fn command_label(program: &str, args: &[&str]) -> String {
    match args.first() {
        Some(first) => format!("{program} {first}"),
        None => program.to_string(),
    }
}

fn base_command(program: &str, args: &[&str], cwd: Option<&Path>) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd
}

/// Run a command with inherited stdio. Used for long steps the user
/// watches directly (package install, frontend build).
pub fn run(program: &str, args: &[&str], cwd: Option<&Path>) -> DeployResult<()> {
    let status = base_command(program, args, cwd)
        .status()
        .map_err(|source| DeployError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(DeployError::CommandFailed {
            command: command_label(program, args),
            status,
            stderr: None,
        });
    }
    Ok(())
}

/// Run a command quietly and return its trimmed stdout. Used for queries
/// like `git config --get` and `git status --porcelain`.
pub fn run_capture(program: &str, args: &[&str], cwd: Option<&Path>) -> DeployResult<String> {
    let output = base_command(program, args, cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| DeployError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(DeployError::CommandFailed {
            command: command_label(program, args),
            status: output.status,
            stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a command streaming stdin/stdout but capturing stderr so failures
/// can be classified. Captured stderr is echoed once the command finishes,
/// keeping progress and hints visible.
pub fn run_classified(program: &str, args: &[&str], cwd: Option<&Path>) -> DeployResult<()> {
    let child = base_command(program, args, cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| DeployError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let output = child.wait_with_output()?;
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(DeployError::CommandFailed {
            command: command_label(program, args),
            status: output.status,
            stderr: Some(stderr),
        });
    }
    if !stderr.trim().is_empty() {
        eprint!("{stderr}");
    }
    Ok(())
}

/// Open a URL in the default browser. Best-effort; callers ignore the
/// result.
pub fn open_in_browser(url: &str) -> DeployResult<()> {
    let status = browser_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| DeployError::Spawn {
            program: "browser opener".to_string(),
            source,
        })?;

    if !status.success() {
        return Err(DeployError::CommandFailed {
            command: "browser opener".to_string(),
            status,
            stderr: None,
        });
    }
    Ok(())
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
