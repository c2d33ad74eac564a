//! Interactive lint repair loop.
//!
//! ```text
//! Editing ──ok──▶ Linting ──pass──▶ Done
//!    ▲               │
//!    │             fail
//!    │               ▼
//!    └──keep edit── PromptRetry ──give up──▶ Cancelled
//! ```
//!
//! The loop has no retry cap: it runs until the message passes or the user
//! gives up.

use tracing::debug;

use crate::commit::lint::{LintViolation, lint};
use crate::config::LintRules;
use crate::error::RepairError;
use crate::prompt::Prompter;

/// State of the repair loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairState {
    Editing { draft: String, open_editor: bool },
    Linting { draft: String },
    PromptRetry {
        draft: String,
        violations: Vec<LintViolation>,
    },
    Done(String),
    Cancelled,
}

impl RepairState {
    /// Initial state for a freshly rendered message.
    pub fn start(draft: impl Into<String>) -> Self {
        RepairState::Editing {
            draft: draft.into(),
            open_editor: false,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, RepairState::Done(_) | RepairState::Cancelled)
    }
}

/// Advance the loop by one transition.
pub fn step<P, L>(state: RepairState, prompter: &P, lint_fn: &mut L) -> Result<RepairState, RepairError>
where
    P: Prompter + ?Sized,
    L: FnMut(&str) -> Vec<LintViolation>,
{
    let next = match state {
        RepairState::Editing { draft, open_editor } => {
            let draft = if open_editor {
                prompter.editor(&draft)?.trim_end().to_string()
            } else {
                draft
            };

            prompter.show(&draft);
            if prompter.confirm("Commit message looks OK?", true)? {
                RepairState::Linting { draft }
            } else {
                RepairState::Editing {
                    draft,
                    open_editor: true,
                }
            }
        }
        RepairState::Linting { draft } => {
            let violations = lint_fn(&draft);
            if violations.is_empty() {
                RepairState::Done(draft)
            } else {
                RepairState::PromptRetry { draft, violations }
            }
        }
        RepairState::PromptRetry { draft, violations } => {
            for v in &violations {
                prompter.warn(&v.to_string());
            }
            if prompter.confirm("Keep editing the message?", true)? {
                RepairState::Editing {
                    draft,
                    open_editor: true,
                }
            } else {
                RepairState::Cancelled
            }
        }
        terminal => terminal,
    };

    debug!("Repair loop -> {}", discriminant_name(&next));
    Ok(next)
}

fn discriminant_name(state: &RepairState) -> &'static str {
    match state {
        RepairState::Editing { .. } => "Editing",
        RepairState::Linting { .. } => "Linting",
        RepairState::PromptRetry { .. } => "PromptRetry",
        RepairState::Done(_) => "Done",
        RepairState::Cancelled => "Cancelled",
    }
}

/// Run the loop to completion with an injected lint function.
pub fn run_repair_loop<P, L>(
    draft: impl Into<String>,
    prompter: &P,
    mut lint_fn: L,
) -> Result<String, RepairError>
where
    P: Prompter + ?Sized,
    L: FnMut(&str) -> Vec<LintViolation>,
{
    let mut state = RepairState::start(draft);
    while !state.is_terminal() {
        state = step(state, prompter, &mut lint_fn)?;
    }

    match state {
        RepairState::Done(message) => Ok(message),
        _ => Err(RepairError::Cancelled),
    }
}

/// Run the loop with the configured lint rules.
pub fn repair_message<P: Prompter + ?Sized>(
    draft: impl Into<String>,
    rules: &LintRules,
    prompter: &P,
) -> Result<String, RepairError> {
    run_repair_loop(draft, prompter, |msg| lint(msg, rules))
}
