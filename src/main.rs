//! mernfinity CLI - interactive deploy helper for MERN projects
//!
//! Usage: mernfinity [COMMAND]
//!
//! Commands:
//!   build   Build the frontend and copy the bundle into the public directory
//!   push    Commit and push the project to GitHub
//!   deploy  Generate a render.yaml blueprint for Render
//!
//! With no command, an interactive menu composes the flows.

use anyhow::Result;
use clap::{Parser, Subcommand};

use mernfinity::commands;
use mernfinity::history::FsHistoryStore;
use mernfinity::prompt::TerminalPrompter;
use mernfinity::state::detect_layout;

/// mernfinity - interactive deploy helper for MERN projects
#[derive(Parser, Debug)]
#[command(name = "mernfinity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the frontend and copy the bundle into the public directory
    Build {
        /// Package manager used for install/build (npm, yarn, pnpm)
        #[arg(long, default_value = "npm")]
        package_manager: String,
    },

    /// Commit and push the project to GitHub
    Push,

    /// Generate a render.yaml blueprint for Render
    Deploy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let store = FsHistoryStore::new()?;
    let mut prompter = TerminalPrompter::new();

    match cli.command {
        Some(Commands::Build { package_manager }) => {
            let layout = detect_layout(&cwd);
            commands::build::run(&cwd, &mut prompter, &layout, &package_manager)?;
        }
        Some(Commands::Push) => commands::push::execute(&cwd, &mut prompter, &store),
        Some(Commands::Deploy) => commands::deploy::execute(&cwd, &mut prompter, &store),
        None => commands::interactive::run(&cwd, &mut prompter, &store)?,
    }

    Ok(())
}
