//! Build the frontend and publish the bundle into the server's public
//! directory.

use std::path::Path;

use crate::error::{DeployError, DeployResult};
use crate::prompt::{Prompter, Validation};
use crate::state::ProjectLayout;
use crate::{exec, fsops, ui};

const DEFAULT_PUBLIC_DIR: &str = "./public";
const BUILD_OUTPUT_DIR: &str = "dist";

/// Prompt for directories, then install, build, and replace the public
/// directory with the build output. Failures propagate to the caller;
/// a cleared-but-unfilled public directory is a possible terminal state.
pub fn run(
    cwd: &Path,
    prompter: &mut dyn Prompter,
    layout: &ProjectLayout,
    package_manager: &str,
) -> DeployResult<()> {
    ui::heading("Build frontend");

    let frontend = prompter.input(
        "Path to the frontend directory",
        Some(&layout.frontend_default()),
        Validation::ExistingDir,
    )?;
    let public = prompter.input(
        "Path to the backend public directory",
        Some(DEFAULT_PUBLIC_DIR),
        Validation::NonEmpty,
    )?;

    let frontend_dir = cwd.join(frontend.trim());
    let public_dir = cwd.join(public.trim());

    build_frontend(&frontend_dir, package_manager)?;
    publish_assets(&frontend_dir, &public_dir)?;

    ui::success("Build complete, public directory updated");
    Ok(())
}

/// Run `<pm> install` and `<pm> run build` inside the frontend directory.
pub fn build_frontend(frontend_dir: &Path, package_manager: &str) -> DeployResult<()> {
    ui::step("Installing frontend dependencies...");
    exec::run(package_manager, &["install"], Some(frontend_dir))?;

    ui::step("Building frontend bundle...");
    exec::run(package_manager, &["run", "build"], Some(frontend_dir))
}

/// Replace the public directory with the contents of the frontend's
/// `dist/` output. The old contents are removed first; nothing of them
/// survives.
pub fn publish_assets(frontend_dir: &Path, public_dir: &Path) -> DeployResult<()> {
    let dist = frontend_dir.join(BUILD_OUTPUT_DIR);
    if !dist.is_dir() {
        return Err(DeployError::DirectoryNotFound { path: dist });
    }

    if public_dir.exists() {
        ui::step("Clearing old public directory...");
    }
    fsops::reset_dir(public_dir)?;

    ui::step("Copying build output into the public directory...");
    fsops::copy_dir_contents(&dist, public_dir)
}
