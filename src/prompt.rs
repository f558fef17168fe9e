//! Interactive prompting seam.
//!
//! Flows ask questions through the `Prompter` trait instead of touching
//! the terminal directly, so orchestration can be driven by a scripted
//! answer source in tests. The terminal implementation uses `dialoguer`.

use std::collections::VecDeque;
use std::path::Path;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{DeployError, DeployResult};

/// Validation rule applied at the prompt; invalid input is re-asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    None,
    NonEmpty,
    ExistingDir,
}

pub trait Prompter {
    /// Free-form text question. An empty submission resolves to `default`
    /// when one is given.
    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validation: Validation,
    ) -> DeployResult<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> DeployResult<bool>;

    /// Pick one of `items`; returns the chosen index.
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> DeployResult<usize>;
}

fn validate(answer: &str, validation: Validation) -> Result<(), &'static str> {
    match validation {
        Validation::None => Ok(()),
        Validation::NonEmpty => {
            if answer.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        }
        Validation::ExistingDir => {
            if Path::new(answer.trim()).is_dir() {
                Ok(())
            } else {
                Err("directory not found, enter a valid path")
            }
        }
    }
}

/// Prompter backed by the terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validation: Validation,
    ) -> DeployResult<String> {
        let mut question = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(value) = default {
            question = question.default(value.to_string());
        }
        let question =
            question.validate_with(move |answer: &String| validate(answer, validation));
        Ok(question.interact_text()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> DeployResult<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> DeployResult<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }
}

/// Scripted answer for [`ScriptedPrompter`].
#[derive(Debug, Clone)]
pub enum Answer {
    /// Answer to `input`; an empty string takes the prompt's default.
    Text(String),
    /// Answer to `confirm`.
    Flag(bool),
    /// Answer to `select`, matched against item labels by substring.
    Choice(String),
    /// Answer to `select` that accepts the offered default index.
    DefaultChoice,
}

/// Deterministic prompter that replays a fixed answer list in order.
/// Questions and answers must line up exactly; a mismatch is an error so
/// tests fail loudly instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, answer: &str) -> Self {
        self.answers.push_back(Answer::Text(answer.to_string()));
        self
    }

    pub fn flag(mut self, answer: bool) -> Self {
        self.answers.push_back(Answer::Flag(answer));
        self
    }

    pub fn choose(mut self, label: &str) -> Self {
        self.answers.push_back(Answer::Choice(label.to_string()));
        self
    }

    pub fn choose_default(mut self) -> Self {
        self.answers.push_back(Answer::DefaultChoice);
        self
    }

    fn next(&mut self, prompt: &str) -> DeployResult<Answer> {
        self.answers
            .pop_front()
            .ok_or_else(|| DeployError::ScriptedAnswer {
                prompt: prompt.to_string(),
                reason: "no answers left".to_string(),
            })
    }

    fn mismatch(prompt: &str, reason: impl Into<String>) -> DeployError {
        DeployError::ScriptedAnswer {
            prompt: prompt.to_string(),
            reason: reason.into(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validation: Validation,
    ) -> DeployResult<String> {
        match self.next(prompt)? {
            Answer::Text(text) => {
                let answer = if text.is_empty() {
                    default.unwrap_or_default().to_string()
                } else {
                    text
                };
                validate(&answer, validation)
                    .map_err(|reason| Self::mismatch(prompt, reason))?;
                Ok(answer)
            }
            other => Err(Self::mismatch(prompt, format!("expected text, got {other:?}"))),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> DeployResult<bool> {
        match self.next(prompt)? {
            Answer::Flag(flag) => Ok(flag),
            other => Err(Self::mismatch(prompt, format!("expected flag, got {other:?}"))),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> DeployResult<usize> {
        match self.next(prompt)? {
            Answer::Choice(label) => items
                .iter()
                .position(|item| item.contains(&label))
                .ok_or_else(|| {
                    Self::mismatch(prompt, format!("no item matches '{label}' in {items:?}"))
                }),
            Answer::DefaultChoice => Ok(default),
            other => Err(Self::mismatch(prompt, format!("expected choice, got {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_and_default() {
        let mut prompter = ScriptedPrompter::new().text("hello").text("");

        assert_eq!(
            prompter.input("q1", None, Validation::NonEmpty).unwrap(),
            "hello"
        );
        assert_eq!(
            prompter
                .input("q2", Some("fallback"), Validation::NonEmpty)
                .unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_scripted_input_rejects_invalid() {
        let mut prompter = ScriptedPrompter::new().text("   ");
        let err = prompter.input("q", None, Validation::NonEmpty).unwrap_err();
        assert!(matches!(err, DeployError::ScriptedAnswer { .. }));
    }

    #[test]
    fn test_scripted_select_matches_label() {
        let mut prompter = ScriptedPrompter::new().choose("existing");
        let items = vec![
            "Create new repository".to_string(),
            "Use existing repository".to_string(),
        ];
        assert_eq!(prompter.select("q", &items, 0).unwrap(), 1);
    }

    #[test]
    fn test_scripted_select_default_choice() {
        let mut prompter = ScriptedPrompter::new().choose_default();
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(prompter.select("q", &items, 1).unwrap(), 1);
    }

    #[test]
    fn test_scripted_runs_out_of_answers() {
        let mut prompter = ScriptedPrompter::new();
        let err = prompter.confirm("q", true).unwrap_err();
        assert!(matches!(err, DeployError::ScriptedAnswer { .. }));
    }

    #[test]
    fn test_scripted_kind_mismatch() {
        let mut prompter = ScriptedPrompter::new().flag(true);
        let err = prompter.input("q", None, Validation::None).unwrap_err();
        assert!(matches!(err, DeployError::ScriptedAnswer { .. }));
    }
}
