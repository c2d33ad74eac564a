//! Running the system `git` binary.
//!
//! Operations shell out to `git`, inheriting the user's git config, hooks,
//! SSH agent and credential store.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Captured result of a git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait for executing git commands.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run `git <args>` and capture its output, whatever the exit code.
    async fn run(&self, args: &[String]) -> Result<CommandOutput, GitError>;
}

/// Executor that calls the real git binary in a working directory.
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

/// Check that git is installed and on PATH.
pub fn check_git_installed() -> Result<PathBuf, GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)
}

#[async_trait]
impl GitExecutor for SystemGit {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(GitError::SpawnFailed)?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Run a git command and fail on a non-zero exit code.
pub async fn run_checked<E: GitExecutor + ?Sized>(
    git: &E,
    args: &[&str],
) -> Result<String, GitError> {
    let output = git.run(&to_args(args)).await?;
    if !output.success() {
        return Err(GitError::NonZeroExit {
            command: args.join(" "),
            code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output.stdout)
}

fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Paths staged for the next commit.
pub async fn staged_files<E: GitExecutor + ?Sized>(git: &E) -> Result<Vec<String>, GitError> {
    let out = run_checked(git, &["diff", "--cached", "--name-only"]).await?;
    Ok(non_empty_lines(&out))
}

/// A path with pending changes, as reported by `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPath {
    /// Two-letter porcelain status, e.g. ` M`, `??`, `A `.
    pub status: String,
    pub path: String,
}

/// Parse `git status --porcelain` output.
///
/// Renames (`R  old -> new`) report the new path.
pub fn parse_porcelain(output: &str) -> Vec<ChangedPath> {
    output
        .lines()
        .filter(|l| l.len() > 3)
        .map(|l| {
            let (status, rest) = l.split_at(2);
            let path = rest.trim_start();
            let path = path.rsplit(" -> ").next().unwrap_or(path);
            ChangedPath {
                status: status.to_string(),
                path: path.trim_matches('"').to_string(),
            }
        })
        .collect()
}

/// Paths with unstaged or untracked changes.
pub async fn changed_files<E: GitExecutor + ?Sized>(
    git: &E,
) -> Result<Vec<ChangedPath>, GitError> {
    let out = run_checked(git, &["status", "--porcelain", "--untracked-files=all"]).await?;
    Ok(parse_porcelain(&out)
        .into_iter()
        .filter(|c| c.status.chars().nth(1).is_some_and(|s| s != ' '))
        .collect())
}

/// Name of the checked-out branch. Empty on a detached HEAD.
pub async fn current_branch<E: GitExecutor + ?Sized>(git: &E) -> Result<String, GitError> {
    let out = run_checked(git, &["branch", "--show-current"]).await?;
    Ok(out.trim().to_string())
}

pub async fn stage_paths<E: GitExecutor + ?Sized>(
    git: &E,
    paths: &[String],
) -> Result<(), GitError> {
    if paths.is_empty() {
        return Ok(());
    }
    let mut args = vec!["add", "--"];
    args.extend(paths.iter().map(String::as_str));
    run_checked(git, &args).await?;
    Ok(())
}

/// Create a commit, or rewrite the last one when `amend` is set.
pub async fn commit<E: GitExecutor + ?Sized>(
    git: &E,
    message: &str,
    amend: bool,
) -> Result<(), GitError> {
    let mut args = vec!["commit"];
    if amend {
        args.push("--amend");
    }
    args.extend(["-m", message]);
    run_checked(git, &args).await?;
    Ok(())
}

pub async fn push<E: GitExecutor + ?Sized>(git: &E) -> Result<(), GitError> {
    run_checked(git, &["push"]).await?;
    Ok(())
}

/// Create a branch, switching to it unless `checkout` is false.
pub async fn create_branch<E: GitExecutor + ?Sized>(
    git: &E,
    name: &str,
    checkout: bool,
) -> Result<(), GitError> {
    if checkout {
        run_checked(git, &["checkout", "-b", name]).await?;
    } else {
        run_checked(git, &["branch", name]).await?;
    }
    Ok(())
}

/// Full message of the HEAD commit, or `None` when there are no commits.
pub async fn last_commit_message<E: GitExecutor + ?Sized>(
    git: &E,
) -> Result<Option<String>, GitError> {
    let output = git.run(&to_args(&["log", "-1", "--pretty=%B"])).await?;
    if !output.success() {
        return Ok(None);
    }
    let message = output.stdout.trim_end().to_string();
    Ok((!message.is_empty()).then_some(message))
}

/// Whether HEAD has a parent commit.
pub async fn head_has_parent<E: GitExecutor + ?Sized>(git: &E) -> Result<bool, GitError> {
    let output = git
        .run(&to_args(&["rev-parse", "--verify", "--quiet", "HEAD~1"]))
        .await?;
    Ok(output.success())
}

/// Undo the last commit, keeping its changes staged.
pub async fn undo_last_commit<E: GitExecutor + ?Sized>(git: &E) -> Result<(), GitError> {
    run_checked(git, &["reset", "--soft", "HEAD~1"]).await?;
    Ok(())
}
