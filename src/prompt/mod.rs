//! Interactive prompt collaborator.
//!
//! The commit and branch flows only talk to [`Prompter`], so tests can script
//! answers without a terminal.

use dialoguer::{Confirm, Editor, Input, MultiSelect, Select};

use crate::error::PromptError;

/// Questions the interactive flows can ask.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Free-text input. Empty answers are allowed.
    fn input(&self, prompt: &str, default: Option<String>) -> Result<String, PromptError>;

    /// Pick one item; returns its index.
    fn select(&self, prompt: &str, items: &[String], default: usize)
    -> Result<usize, PromptError>;

    /// Pick any number of items; returns their indices.
    fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> Result<Vec<usize>, PromptError>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError>;

    /// Multi-line edit of `initial` in the user's editor.
    fn editor(&self, initial: &str) -> Result<String, PromptError>;

    /// Display text, such as a draft message, without asking anything.
    fn show(&self, text: &str);

    /// Show a warning without asking anything.
    fn warn(&self, message: &str);
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

fn interaction(e: impl std::fmt::Display) -> PromptError {
    PromptError::Interaction(e.to_string())
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<String>) -> Result<String, PromptError> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default);
        }
        input.interact_text().map_err(interaction)
    }

    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, PromptError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(interaction)
    }

    fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> Result<Vec<usize>, PromptError> {
        MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .defaults(defaults)
            .interact()
            .map_err(interaction)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(interaction)
    }

    fn editor(&self, initial: &str) -> Result<String, PromptError> {
        Editor::new()
            .edit(initial)
            .map_err(interaction)?
            .ok_or(PromptError::EditorAborted)
    }

    fn show(&self, text: &str) {
        println!("\n{}\n", text);
    }

    fn warn(&self, message: &str) {
        eprintln!("\x1b[33m⚠ {}\x1b[0m", message);
    }
}
