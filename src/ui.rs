//! Terminal output helpers.
//!
//! Design tokens for the CLI:
//! - Only 5 semantic colors (`colors::*`)
//! - All icons are sourced from this module
//!
//! Color is suppressed when stdout is not a terminal or `NO_COLOR` is set.

use std::fmt::Display;

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const STEP: &str = "●";
    pub const ARROW: &str = "↳";
}

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Apply a color token to `text`, honoring terminal detection and NO_COLOR.
pub fn paint(text: &str, color: Color) -> String {
    if color_enabled() {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Section heading printed at the start of a flow.
pub fn heading(title: &str) {
    println!();
    println!("{}", paint(title, colors::INFO));
}

/// Progress line for a step that is about to run.
pub fn step(message: &str) {
    println!("{} {}", paint(icons::STEP, colors::INFO), message);
}

pub fn success(message: &str) {
    println!("{} {}", paint(icons::SUCCESS, colors::SUCCESS), message);
}

pub fn info(message: &str) {
    println!("{} {}", paint(icons::ARROW, colors::INFO), message);
}

pub fn warn(message: &str) {
    eprintln!("{} {}", paint(icons::WARNING, colors::WARNING), message);
}

pub fn hint(message: &str) {
    println!("{}", paint(message, colors::DIM));
}

/// Failure banner for a flow that caught its own error.
pub fn failure(context: &str, err: &dyn Display) {
    eprintln!();
    eprintln!(
        "{} {}: {}",
        paint(icons::ERROR, colors::ERROR),
        paint(context, colors::ERROR),
        err
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_without_terminal_is_plain() {
        // Tests never run attached to a terminal, so paint must pass text
        // through unchanged.
        assert_eq!(paint("hello", colors::SUCCESS), "hello");
    }
}
