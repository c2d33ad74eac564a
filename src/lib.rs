//! herald - an interactive git assistant.
//!
//! # Overview
//!
//! herald builds conventional commit messages and branch names from
//! placeholder templates, lints messages and walks the user through fixing
//! them, and searches and summarizes repository history.

pub mod branch;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod prompt;
pub mod template;

// Re-export commonly used types
pub use commit::{CommitAnswers, LintViolation, lint};
pub use config::{Config, LintRules, PlaceholderConfig};
pub use error::{
    BranchError, CommitError, ConfigError, GitError, PatternError, PromptError, RepairError,
};
pub use git::{GitExecutor, HistoryEntry, HistoryQuery, RepoStats, SystemGit};
pub use prompt::{DialoguerPrompter, Prompter};
pub use template::{render_branch_name, render_commit_message, sanitize};
