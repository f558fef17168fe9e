//! Interactive menu composing the three flows.

use std::path::Path;

use is_terminal::IsTerminal;

use crate::error::DeployResult;
use crate::history::HistoryStore;
use crate::prompt::Prompter;
use crate::state::detect_layout;
use crate::{commands, ui};

const DEFAULT_PACKAGE_MANAGER: &str = "npm";

pub fn run(cwd: &Path, prompter: &mut dyn Prompter, store: &dyn HistoryStore) -> DeployResult<()> {
    if !std::io::stdin().is_terminal() {
        println!("No command provided.");
        println!("Try: `mernfinity build` or `mernfinity --help`");
        return Ok(());
    }

    print_banner();

    let layout = detect_layout(cwd);
    println!("{}\n", layout.summary());

    let items: Vec<String> = [
        "[1] Build frontend into public directory",
        "[2] Build and push to GitHub",
        "[3] Build, push, and prepare Render deploy",
        "[4] Push to GitHub only",
        "[5] Create Render blueprint only",
        "[6] Quit",
    ]
    .iter()
    .map(|item| item.to_string())
    .collect();

    let selection = prompter.select("What would you like to do?", &items, 0)?;

    // Build failures propagate (the process exits non-zero); the push and
    // deploy flows report their own failures and the menu run ends
    // normally.
    match selection {
        0 => commands::build::run(cwd, prompter, &layout, DEFAULT_PACKAGE_MANAGER)?,
        1 => {
            commands::build::run(cwd, prompter, &layout, DEFAULT_PACKAGE_MANAGER)?;
            commands::push::execute(cwd, prompter, store);
        }
        2 => {
            commands::build::run(cwd, prompter, &layout, DEFAULT_PACKAGE_MANAGER)?;
            commands::push::execute(cwd, prompter, store);
            commands::deploy::execute(cwd, prompter, store);
        }
        3 => commands::push::execute(cwd, prompter, store),
        4 => commands::deploy::execute(cwd, prompter, store),
        _ => {}
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!(
        "{} v{}",
        ui::paint("MERN deploy helper", ui::colors::INFO),
        env!("CARGO_PKG_VERSION")
    );
    println!();
}
