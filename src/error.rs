//! Error types for herald modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or writing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid settings for placeholder '{name}': {source}")]
    InvalidPlaceholder {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config file: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("Config file {0} already exists. Use --force to overwrite.")]
    AlreadyExists(PathBuf),
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotInstalled,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {command} exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),
}

/// Errors from the interactive prompt collaborator.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt failed: {0}")]
    Interaction(String),

    #[error("Editor closed without saving")]
    EditorAborted,
}

/// A configured regular expression could not be compiled.
#[derive(Error, Debug)]
#[error("Invalid pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex_lite::Error,
}

/// Outcomes of the lint repair loop that end without a message.
#[derive(Error, Debug)]
pub enum RepairError {
    #[error("Commit message editing cancelled with unresolved lint violations")]
    Cancelled,

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Errors from the commit and amend flows.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No changes to commit (working tree is clean)")]
    NoChanges,

    #[error("No files selected for staging")]
    NothingSelected,

    #[error("Commit aborted")]
    Aborted,

    #[error("Commit message editing cancelled with unresolved lint violations")]
    Cancelled,

    #[error("No commit to amend")]
    NothingToAmend,

    #[error("The last commit is the root commit and cannot be undone")]
    RootCommit,

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Git(#[from] GitError),
}

impl From<RepairError> for CommitError {
    fn from(err: RepairError) -> Self {
        match err {
            RepairError::Cancelled => CommitError::Cancelled,
            RepairError::Prompt(e) => CommitError::Prompt(e),
        }
    }
}

/// Errors from the branch creation flow.
#[derive(Error, Debug)]
pub enum BranchError {
    #[error("Branch creation aborted")]
    Aborted,

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Git(#[from] GitError),
}
