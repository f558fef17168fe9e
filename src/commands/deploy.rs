//! Generate a Render blueprint for the backend service.
//!
//! Collects the repository URL, service name, environment variables and
//! start command, writes `render.yaml`, and walks the user through the
//! manual dashboard steps. Deploying itself happens on Render once the
//! blueprint repository is connected.

use std::path::Path;

use crate::blueprint::{Blueprint, ServiceDescriptor, BLUEPRINT_FILE, BLUEPRINT_NEW_URL, DASHBOARD_URL};
use crate::envfile::{self, EnvSet};
use crate::error::DeployResult;
use crate::history::{HistoryStore, RenderHistory};
use crate::prompt::{Prompter, Validation};
use crate::{exec, ui};

const DEFAULT_SERVER_FILE: &str = "server.js";

/// Run the flow, catching its own errors at the boundary.
pub fn execute(cwd: &Path, prompter: &mut dyn Prompter, store: &dyn HistoryStore) {
    if let Err(err) = run(cwd, prompter, store) {
        ui::failure("Render deployment setup failed", &err);
    }
}

pub fn run(cwd: &Path, prompter: &mut dyn Prompter, store: &dyn HistoryStore) -> DeployResult<()> {
    ui::heading("Prepare Render deployment");

    let history = store.load_render();

    let repo_url = resolve_repo_url(prompter, &history)?;
    let service_name = resolve_service_name(prompter, &history)?;
    let envs = resolve_env_vars(cwd, prompter, &history)?;

    let server_file = prompter.input(
        "Server file name (e.g. server.js, index.js)",
        Some(DEFAULT_SERVER_FILE),
        Validation::NonEmpty,
    )?;

    let blueprint = Blueprint::single(ServiceDescriptor::web(
        &service_name,
        &repo_url,
        server_file.trim(),
        &envs,
    ));
    blueprint.write(cwd)?;
    ui::success(&format!("Created {BLUEPRINT_FILE} blueprint"));

    print_instructions(&service_name);

    // Best-effort; a missing or failing opener is not an error.
    let _ = exec::open_in_browser(BLUEPRINT_NEW_URL);

    let saved = store.save_render(RenderHistory {
        last_used_repo: Some(repo_url),
        last_used_envs: Some(envs),
        last_service_name: Some(service_name),
    });
    if let Err(err) = saved {
        ui::warn(&format!("Could not save Render history: {err}"));
    }

    Ok(())
}

fn resolve_repo_url(prompter: &mut dyn Prompter, history: &RenderHistory) -> DeployResult<String> {
    if let Some(last) = &history.last_used_repo {
        if prompter.confirm(&format!("Use last deployed repository ({last})?"), true)? {
            return Ok(last.clone());
        }
    }
    let url = prompter.input("GitHub repository URL", None, Validation::NonEmpty)?;
    Ok(url.trim().to_string())
}

fn resolve_service_name(
    prompter: &mut dyn Prompter,
    history: &RenderHistory,
) -> DeployResult<String> {
    if let Some(last) = &history.last_service_name {
        if prompter.confirm(&format!("Use last service name ({last})?"), true)? {
            return Ok(last.clone());
        }
    }
    let name = prompter.input("Name for the Render service", None, Validation::NonEmpty)?;
    Ok(name.trim().to_string())
}

/// Assemble the environment-variable set additively: the `.env` file if
/// the user opts in, the last-used set if the result is still empty, and
/// manually entered pairs.
fn resolve_env_vars(
    cwd: &Path,
    prompter: &mut dyn Prompter,
    history: &RenderHistory,
) -> DeployResult<EnvSet> {
    let mut envs = EnvSet::new();

    let env_path = cwd.join(".env");
    if env_path.is_file() {
        ui::info("Found .env file");
        if prompter.confirm("Use environment variables from .env file?", true)? {
            envs.extend_from(&envfile::load_env_file(&env_path)?);
            ui::success("Environment variables loaded from .env");
        }
    }

    if envs.is_empty() {
        if let Some(last) = &history.last_used_envs {
            if prompter.confirm("Use last used environment variables?", true)? {
                envs.extend_from(last);
                ui::success("Loaded last used environment variables");
            }
        }
    }

    if prompter.confirm("Add more environment variables?", envs.is_empty())? {
        loop {
            let key = prompter.input("Environment variable name", None, Validation::NonEmpty)?;
            let value = prompter.input("Environment variable value", None, Validation::NonEmpty)?;
            envs.insert(key.trim().to_string(), value);
            if !prompter.confirm("Add another environment variable?", false)? {
                break;
            }
        }
    }

    Ok(envs)
}

fn print_instructions(service_name: &str) {
    println!();
    ui::info("To deploy your application:");
    println!();
    println!("First time setup:");
    ui::hint(&format!("  1. Visit {DASHBOARD_URL}"));
    ui::hint("  2. Sign in with your GitHub account");
    ui::hint("  3. Go to 'Blueprints' in the left sidebar");
    ui::hint("  4. Click 'New Blueprint Instance'");
    ui::hint("  5. Select your repository, click 'Connect' and wait for deployment");
    println!();
    println!("Subsequent deployments:");
    ui::hint("  Pushes to your main branch trigger deployments automatically;");
    ui::hint("  you can also deploy manually from the Render dashboard.");
    println!();
    ui::info("Once deployed, your app will be available at:");
    println!("  https://{service_name}.onrender.com");
    println!();
    ui::warn("Don't forget to push your changes to GitHub!");
    ui::hint("  Run the 'Push to GitHub' flow so the deployment picks them up.");
}
