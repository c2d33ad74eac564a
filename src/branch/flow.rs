//! Branch creation from the configured branch template.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::Config;
use crate::error::{BranchError, PromptError};
use crate::git::executor::{self, GitExecutor};
use crate::prompt::Prompter;
use crate::template::{RandomSource, placeholders, render_branch_name};

#[derive(Debug, Clone, Copy)]
pub struct BranchOptions {
    /// Switch to the new branch after creating it.
    pub checkout: bool,
}

impl Default for BranchOptions {
    fn default() -> Self {
        Self { checkout: true }
    }
}

/// Ask for a value for every placeholder in the branch template.
///
/// `{type}` is chosen from the configured commit types; everything else is
/// free text.
pub fn collect_branch_answers<P: Prompter + ?Sized>(
    prompter: &P,
    config: &Config,
) -> Result<BTreeMap<String, String>, PromptError> {
    let mut answers = BTreeMap::new();

    for name in placeholders(&config.branch_template) {
        let value = if name == "type" && !config.commit_types.is_empty() {
            let items: Vec<String> = config.commit_types.iter().map(|t| t.label()).collect();
            let idx = prompter.select("Select the type of change", &items, 0)?;
            config
                .commit_types
                .get(idx)
                .map(|t| t.value.clone())
                .unwrap_or_default()
        } else {
            prompter.input(&name, None)?
        };
        answers.insert(name, value);
    }

    Ok(answers)
}

/// Prompt for the branch placeholders, render the name and create the branch.
///
/// Returns the created branch name.
pub async fn run_branch<E, P>(
    git: &E,
    prompter: &P,
    config: &Config,
    options: &BranchOptions,
    rng: &mut impl RandomSource,
) -> Result<String, BranchError>
where
    E: GitExecutor + ?Sized,
    P: Prompter + ?Sized,
{
    let answers = collect_branch_answers(prompter, config)?;
    let name = render_branch_name(
        &config.branch_template,
        &answers,
        &config.placeholder_configs(),
        rng,
    );
    debug!("Rendered branch name: {}", name);

    if !prompter.confirm(&format!("Create branch {}?", name), true)? {
        return Err(BranchError::Aborted);
    }

    executor::create_branch(git, &name, options.checkout).await?;
    if options.checkout {
        println!("  [DONE] Switched to new branch {}", name);
    } else {
        println!("  [DONE] Created branch {}", name);
    }

    Ok(name)
}
