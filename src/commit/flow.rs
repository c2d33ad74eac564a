//! Interactive commit, amend and undo flows.
//!
//! Each flow talks to git through a [`GitExecutor`] and to the user through a
//! [`Prompter`], so both can be replaced in tests.

use tracing::{debug, warn};

use crate::commit::answers::{CommitAnswers, is_builtin_placeholder};
use crate::commit::repair::repair_message;
use crate::commit::suggest::suggest_commit_type;
use crate::commit::ticket::extract_ticket;
use crate::config::Config;
use crate::error::{CommitError, PromptError};
use crate::git::executor::{self, GitExecutor};
use crate::prompt::Prompter;
use crate::template::{placeholders, render_commit_message};

/// Flags from the command line that override prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOptions {
    /// `Some` skips the push question.
    pub push: Option<bool>,
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub message: String,
    pub pushed: bool,
    /// Set when the commit succeeded but the push did not.
    pub push_error: Option<String>,
}

/// Ask the commit questions enabled in `config`.
///
/// `suggested_type` preselects the type list when it names a configured
/// type. `branch` is used to fill the ticket when the user leaves it empty.
pub fn collect_answers<P: Prompter + ?Sized>(
    prompter: &P,
    config: &Config,
    suggested_type: Option<&str>,
    branch: &str,
    options: &CommitOptions,
) -> Result<CommitAnswers, PromptError> {
    let mut answers = CommitAnswers::default();

    answers.commit_type = if config.commit_types.is_empty() {
        prompter.input("Commit type", None)?
    } else {
        let items: Vec<String> = config.commit_types.iter().map(|t| t.label()).collect();
        let default = suggested_type
            .and_then(|s| config.commit_types.iter().position(|t| t.value == s))
            .unwrap_or(0);
        let idx = prompter.select("Select the type of change", &items, default)?;
        config
            .commit_types
            .get(idx)
            .map(|t| t.value.clone())
            .unwrap_or_default()
    };

    if config.prompts.scope {
        answers.scope = prompter.input("Scope (optional)", None)?;
    }

    answers.summary = prompter.input("Short summary", None)?;

    if config.ticket.prompt {
        let ticket = prompter.input("Ticket (optional)", None)?;
        answers.ticket = if ticket.trim().is_empty() {
            let extracted = extract_ticket(branch, &config.ticket.pattern).unwrap_or_default();
            if !extracted.is_empty() {
                debug!("Using ticket {} from branch {}", extracted, branch);
            }
            extracted
        } else {
            ticket
        };
    }

    if config.prompts.body {
        answers.body = prompter.input("Body (optional)", None)?;
    }

    if config.prompts.footer {
        answers.footer = prompter.input("Footer (optional)", None)?;
    }

    for name in placeholders(&config.commit_template) {
        if !is_builtin_placeholder(&name) {
            let value = prompter.input(&name, None)?;
            answers.custom.insert(name, value);
        }
    }

    if config.prompts.ci {
        answers.run_ci = prompter.confirm("Run CI for this commit?", true)?;
    }

    answers.push = match options.push {
        Some(push) => push,
        None if config.prompts.push => prompter.confirm("Push after committing?", false)?,
        None => false,
    };

    Ok(answers)
}

/// Make sure something is staged, offering to stage changed files if not.
///
/// Returns the staged paths.
pub async fn ensure_staged<E, P>(git: &E, prompter: &P) -> Result<Vec<String>, CommitError>
where
    E: GitExecutor + ?Sized,
    P: Prompter + ?Sized,
{
    let staged = executor::staged_files(git).await?;
    if !staged.is_empty() {
        return Ok(staged);
    }

    let changed = executor::changed_files(git).await?;
    if changed.is_empty() {
        return Err(CommitError::NoChanges);
    }

    let items: Vec<String> = changed
        .iter()
        .map(|c| format!("{} {}", c.status, c.path))
        .collect();
    let defaults = vec![false; items.len()];
    let selected = prompter.multi_select("Select files to stage", &items, &defaults)?;
    if selected.is_empty() {
        return Err(CommitError::NothingSelected);
    }

    let paths: Vec<String> = selected
        .into_iter()
        .filter_map(|i| changed.get(i).map(|c| c.path.clone()))
        .collect();
    executor::stage_paths(git, &paths).await?;
    println!("  [DONE] Staged {} file(s)", paths.len());

    Ok(paths)
}

/// Run the full interactive commit.
pub async fn run_commit<E, P>(
    git: &E,
    prompter: &P,
    config: &Config,
    options: &CommitOptions,
) -> Result<CommitOutcome, CommitError>
where
    E: GitExecutor + ?Sized,
    P: Prompter + ?Sized,
{
    let staged = ensure_staged(git, prompter).await?;

    let suggestion = if config.suggest_type {
        suggest_commit_type(&staged)
    } else {
        None
    };
    debug!("Suggested commit type: {:?}", suggestion);

    let branch = if config.ticket.prompt {
        executor::current_branch(git).await?
    } else {
        String::new()
    };

    let answers = collect_answers(prompter, config, suggestion, &branch, options)?;
    let draft = render_commit_message(&config.commit_template, &answers, &config.commit_types);
    let message = repair_message(draft, &config.lint, prompter)?;

    executor::commit(git, &message, false).await?;
    println!("  [DONE] Created commit: {}", message.lines().next().unwrap_or(""));

    let mut outcome = CommitOutcome {
        message,
        pushed: false,
        push_error: None,
    };

    if answers.push {
        match executor::push(git).await {
            Ok(()) => {
                outcome.pushed = true;
                println!("  [DONE] Pushed");
            }
            Err(e) => {
                warn!("Push failed after commit: {}", e);
                outcome.push_error = Some(e.to_string());
            }
        }
    }

    Ok(outcome)
}

/// Rewrite the message of the last commit through the lint repair loop.
pub async fn run_amend<E, P>(git: &E, prompter: &P, config: &Config) -> Result<String, CommitError>
where
    E: GitExecutor + ?Sized,
    P: Prompter + ?Sized,
{
    let last = executor::last_commit_message(git)
        .await?
        .ok_or(CommitError::NothingToAmend)?;

    let message = repair_message(last, &config.lint, prompter)?;
    executor::commit(git, &message, true).await?;
    println!("  [DONE] Amended commit: {}", message.lines().next().unwrap_or(""));

    Ok(message)
}

/// Undo the last commit, keeping its changes staged.
///
/// Returns the message of the commit that was undone.
pub async fn run_undo<E, P>(git: &E, prompter: &P) -> Result<String, CommitError>
where
    E: GitExecutor + ?Sized,
    P: Prompter + ?Sized,
{
    let last = executor::last_commit_message(git)
        .await?
        .ok_or(CommitError::NothingToAmend)?;
    if !executor::head_has_parent(git).await? {
        return Err(CommitError::RootCommit);
    }
    let summary = last.lines().next().unwrap_or("").to_string();

    if !prompter.confirm(&format!("Undo \"{}\"? Changes stay staged.", summary), false)? {
        return Err(CommitError::Aborted);
    }

    executor::undo_last_commit(git).await?;
    println!("  [DONE] Undid commit: {}", summary);

    Ok(last)
}
