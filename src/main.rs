//! herald - CLI entry point.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use herald::branch::{BranchOptions, run_branch};
use herald::commit::{CommitOptions, run_amend, run_commit, run_undo};
use herald::config::{CONFIG_FILE_NAME, ConfigSource, load_or_default, write_default_config};
use herald::git::{
    HistoryEntry, HistoryQuery, RepoStats, SystemGit, check_git_installed, collect_stats,
    open_repository, search_history,
};
use herald::template::ThreadRandom;
use herald::{BranchError, CommitError, Config, DialoguerPrompter, lint};

/// Interactive git assistant for templated commits and branch names.
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Interactive git assistant for templated commits and branch names")]
#[command(version)]
struct Cli {
    /// Config file (overrides HERALD_CONFIG and .herald.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a commit message interactively and commit staged changes
    Commit {
        /// Push after committing without asking
        #[arg(long, conflicts_with = "no_push")]
        push: bool,

        /// Never push after committing
        #[arg(long)]
        no_push: bool,
    },

    /// Edit and lint the message of the last commit
    Amend,

    /// Create a branch from the branch template
    Branch {
        /// Create the branch without switching to it
        #[arg(long)]
        no_checkout: bool,
    },

    /// Search commit history
    Log {
        /// Text to look for in commit messages
        query: Option<String>,

        /// Filter by author name or email
        #[arg(long)]
        author: Option<String>,

        /// Filter by conventional commit type
        #[arg(long = "type")]
        commit_type: Option<String>,

        /// Maximum number of commits to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Show commit statistics for the repository
    Stats,

    /// Undo the last commit, keeping its changes staged
    Undo,

    /// Lint a commit message (argument, file or stdin)
    Lint {
        message: Option<String>,

        /// Read the message from a file, e.g. in a commit-msg hook
        #[arg(long, conflicts_with = "message")]
        file: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default configuration to .herald.json
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "herald=debug" } else { "herald=warn" };
    let filter = EnvFilter::try_from_env("HERALD_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workdir = std::env::current_dir().context("Failed to read current directory")?;
    let (config, source) = load_or_default(cli.config.as_deref(), &workdir);
    if let ConfigSource::File(path) = &source {
        tracing::debug!("Using config {}", path.display());
    }

    match cli.command {
        Command::Commit { push, no_push } => {
            let options = CommitOptions {
                push: match (push, no_push) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            cmd_commit(&workdir, &config, &options).await
        }
        Command::Amend => cmd_amend(&workdir, &config).await,
        Command::Branch { no_checkout } => {
            let options = BranchOptions {
                checkout: !no_checkout,
            };
            cmd_branch(&workdir, &config, &options).await
        }
        Command::Log {
            query,
            author,
            commit_type,
            limit,
        } => {
            let query = HistoryQuery {
                text: query,
                author,
                commit_type,
                limit: Some(limit),
            };
            cmd_log(&workdir, &query)
        }
        Command::Stats => cmd_stats(&workdir),
        Command::Undo => cmd_undo(&workdir).await,
        Command::Lint { message, file } => cmd_lint(&config, message, file.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init { force } => {
                let path = cli.config.unwrap_or_else(|| workdir.join(CONFIG_FILE_NAME));
                write_default_config(&path, force)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("✓ Wrote default configuration to {}", path.display());
                Ok(())
            }
            ConfigAction::Show => {
                match &source {
                    ConfigSource::File(path) => eprintln!("# {}", path.display()),
                    ConfigSource::Defaults => eprintln!("# built-in defaults"),
                }
                let json = serde_json::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                println!("{}", json);
                Ok(())
            }
        },
    }
}

fn system_git(workdir: &Path) -> Result<SystemGit> {
    check_git_installed().context("git is required")?;
    Ok(SystemGit::new(workdir))
}

async fn cmd_commit(workdir: &Path, config: &Config, options: &CommitOptions) -> Result<()> {
    let git = system_git(workdir)?;

    match run_commit(&git, &DialoguerPrompter, config, options).await {
        Ok(outcome) => {
            if let Some(err) = outcome.push_error {
                eprintln!("Warning: commit created but push failed: {}", err);
            }
            Ok(())
        }
        Err(CommitError::Aborted) => {
            println!("Commit aborted.");
            Ok(())
        }
        Err(e) => Err(e).context("Commit failed"),
    }
}

async fn cmd_amend(workdir: &Path, config: &Config) -> Result<()> {
    let git = system_git(workdir)?;

    match run_amend(&git, &DialoguerPrompter, config).await {
        Ok(_) => Ok(()),
        Err(CommitError::Aborted) => {
            println!("Amend aborted.");
            Ok(())
        }
        Err(e) => Err(e).context("Amend failed"),
    }
}

async fn cmd_undo(workdir: &Path) -> Result<()> {
    let git = system_git(workdir)?;

    match run_undo(&git, &DialoguerPrompter).await {
        Ok(_) => Ok(()),
        Err(CommitError::Aborted) => {
            println!("Nothing undone.");
            Ok(())
        }
        Err(e) => Err(e).context("Undo failed"),
    }
}

async fn cmd_branch(workdir: &Path, config: &Config, options: &BranchOptions) -> Result<()> {
    let git = system_git(workdir)?;

    match run_branch(&git, &DialoguerPrompter, config, options, &mut ThreadRandom).await {
        Ok(_) => Ok(()),
        Err(BranchError::Aborted) => {
            println!("Branch creation aborted.");
            Ok(())
        }
        Err(e) => Err(e).context("Branch creation failed"),
    }
}

fn cmd_log(workdir: &Path, query: &HistoryQuery) -> Result<()> {
    let repo = open_repository(workdir)
        .context("Not a git repository. Run herald from within a git repository.")?;
    let entries = search_history(&repo, query).context("Failed to search history")?;

    if entries.is_empty() {
        println!("No matching commits.");
        return Ok(());
    }

    for entry in &entries {
        print_log_line(entry);
    }
    Ok(())
}

fn print_log_line(entry: &HistoryEntry) {
    println!(
        "{}  {}  {:<20}  {}",
        entry.short_hash(),
        entry.timestamp.format("%Y-%m-%d"),
        truncate(&entry.author, 20),
        entry.summary
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

fn cmd_stats(workdir: &Path) -> Result<()> {
    let repo = open_repository(workdir)
        .context("Not a git repository. Run herald from within a git repository.")?;
    let stats = collect_stats(&repo).context("Failed to collect statistics")?;
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &RepoStats) {
    if stats.total_commits == 0 {
        println!("No commits yet.");
        return;
    }

    println!("Commits:        {}", stats.total_commits);
    println!(
        "Conventional:   {} ({:.1}%)",
        stats.conventional_commits,
        stats.conventional_ratio()
    );
    println!("Breaking:       {}", stats.breaking_changes);
    if let (Some(first), Some(last)) = (stats.first_commit, stats.last_commit) {
        println!(
            "Active:         {} .. {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        );
    }

    println!("\nBy type:");
    for (ty, count) in &stats.by_type {
        println!("  {:<12} {:>6}", ty, count);
    }

    println!("\nBy author:");
    for (author, count) in &stats.by_author {
        println!("  {:<24} {:>6}", truncate(author, 24), count);
    }
}

fn cmd_lint(config: &Config, message: Option<String>, file: Option<&Path>) -> Result<()> {
    let message = match (message, file) {
        (Some(m), _) => m,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            buf
        }
    };

    let violations = lint(&message, &config.lint);
    if violations.is_empty() {
        println!("✓ Commit message OK");
        return Ok(());
    }

    for v in &violations {
        eprintln!("✗ {}", v);
    }
    std::process::exit(1);
}
