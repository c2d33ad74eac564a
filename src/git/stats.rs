//! Repository statistics derived from commit history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use git2::Repository;
use serde::Serialize;

use crate::error::GitError;

use super::history::{HistoryEntry, walk_history};

/// Label used for commits without a conventional header.
pub const UNTYPED: &str = "(none)";

/// Aggregate counts over the history reachable from HEAD.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoStats {
    pub total_commits: usize,
    pub conventional_commits: usize,
    /// `(type, count)`, most frequent first.
    pub by_type: Vec<(String, usize)>,
    /// `(author, count)`, most frequent first.
    pub by_author: Vec<(String, usize)>,
    pub breaking_changes: usize,
    pub first_commit: Option<DateTime<Utc>>,
    pub last_commit: Option<DateTime<Utc>>,
}

impl RepoStats {
    /// Share of commits with a conventional header, in percent.
    pub fn conventional_ratio(&self) -> f64 {
        if self.total_commits == 0 {
            return 0.0;
        }
        self.conventional_commits as f64 * 100.0 / self.total_commits as f64
    }
}

fn sorted_counts(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut v: Vec<(String, usize)> = counts.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    v
}

/// Compute statistics over a list of commits.
pub fn compute_stats(entries: &[HistoryEntry]) -> RepoStats {
    let mut by_type: HashMap<String, usize> = HashMap::new();
    let mut by_author: HashMap<String, usize> = HashMap::new();
    let mut stats = RepoStats {
        total_commits: entries.len(),
        ..Default::default()
    };

    for entry in entries {
        match &entry.header {
            Some(header) => {
                stats.conventional_commits += 1;
                if header.breaking {
                    stats.breaking_changes += 1;
                }
                *by_type.entry(header.commit_type.clone()).or_default() += 1;
            }
            None => *by_type.entry(UNTYPED.to_string()).or_default() += 1,
        }

        *by_author.entry(entry.author.clone()).or_default() += 1;

        stats.first_commit = Some(match stats.first_commit {
            Some(t) if t <= entry.timestamp => t,
            _ => entry.timestamp,
        });
        stats.last_commit = Some(match stats.last_commit {
            Some(t) if t >= entry.timestamp => t,
            _ => entry.timestamp,
        });
    }

    stats.by_type = sorted_counts(by_type);
    stats.by_author = sorted_counts(by_author);
    stats
}

/// Walk the repository and compute its statistics.
pub fn collect_stats(repo: &Repository) -> Result<RepoStats, GitError> {
    Ok(compute_stats(&walk_history(repo)?))
}
