//! Git access: subprocess execution for mutations, git2 for history reads.

pub mod executor;
pub mod history;
pub mod stats;

pub use executor::{CommandOutput, GitExecutor, SystemGit, check_git_installed, run_checked};
pub use history::{
    ConventionalHeader, HistoryEntry, HistoryQuery, open_repository, parse_conventional_header,
    search_history,
};
pub use stats::{RepoStats, collect_stats, compute_stats};
