//! Commit history walking and search using git2.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, Repository};
use regex_lite::Regex;
use serde::Serialize;

use crate::error::GitError;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^\sA-Za-z0-9]+\s+)?([A-Za-z]+)(?:\(([^)]+)\))?(!)?\s*:\s*")
        .expect("conventional header regex is valid")
});

/// Conventional commit header parts: type, scope, breaking marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConventionalHeader {
    pub commit_type: String,
    pub scope: Option<String>,
    pub breaking: bool,
}

/// Parse the header of a conventional commit message.
///
/// A leading emoji before the type is tolerated.
pub fn parse_conventional_header(message: &str) -> Option<ConventionalHeader> {
    let first_line = message.lines().next().unwrap_or("");
    let caps = HEADER_RE.captures(first_line)?;

    Some(ConventionalHeader {
        commit_type: caps[1].to_lowercase(),
        scope: caps.get(2).map(|m| m.as_str().to_string()),
        breaking: caps.get(3).is_some()
            || message.contains("BREAKING CHANGE:")
            || message.contains("BREAKING-CHANGE:"),
    })
}

/// A commit as shown by history search.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub hash: String,
    pub summary: String,
    pub message: String,
    pub author: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub header: Option<ConventionalHeader>,
}

impl HistoryEntry {
    pub fn from_git2_commit(commit: &Commit) -> Self {
        let message = commit.message().unwrap_or("").to_string();
        let author = commit.author();
        let timestamp = Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .unwrap_or_else(Utc::now);

        Self {
            hash: commit.id().to_string(),
            summary: message.lines().next().unwrap_or("").to_string(),
            header: parse_conventional_header(&message),
            message,
            author: author.name().unwrap_or("").to_string(),
            email: author.email().unwrap_or("").to_string(),
            timestamp,
        }
    }

    pub fn short_hash(&self) -> &str {
        &self.hash[..self.hash.len().min(7)]
    }

    pub fn commit_type(&self) -> Option<&str> {
        self.header.as_ref().map(|h| h.commit_type.as_str())
    }
}

/// Filters for history search. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Case-insensitive substring of the full message.
    pub text: Option<String>,
    /// Case-insensitive substring of author name or email.
    pub author: Option<String>,
    /// Conventional commit type, e.g. `fix`.
    pub commit_type: Option<String>,
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        if let Some(text) = &self.text
            && !entry.message.to_lowercase().contains(&text.to_lowercase())
        {
            return false;
        }

        if let Some(author) = &self.author {
            let needle = author.to_lowercase();
            if !entry.author.to_lowercase().contains(&needle)
                && !entry.email.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(ty) = &self.commit_type
            && !entry.commit_type().is_some_and(|t| t.eq_ignore_ascii_case(ty))
        {
            return false;
        }

        true
    }
}

pub fn open_repository(path: &Path) -> Result<Repository, GitError> {
    Repository::discover(path).map_err(GitError::OpenRepository)
}

/// Walk every commit reachable from HEAD, newest first.
///
/// An unborn HEAD yields an empty history.
pub fn walk_history(repo: &Repository) -> Result<Vec<HistoryEntry>, GitError> {
    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;
    revwalk
        .set_sorting(git2::Sort::TIME)
        .map_err(GitError::RevwalkError)?;

    if let Err(e) = revwalk.push_head() {
        if e.code() == git2::ErrorCode::UnbornBranch || e.code() == git2::ErrorCode::NotFound {
            return Ok(Vec::new());
        }
        return Err(GitError::RevwalkError(e));
    }

    let mut entries = Vec::new();
    for oid_result in revwalk {
        let oid = oid_result.map_err(GitError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;
        entries.push(HistoryEntry::from_git2_commit(&commit));
    }

    Ok(entries)
}

/// Search history from HEAD with the given filters.
pub fn search_history(
    repo: &Repository,
    query: &HistoryQuery,
) -> Result<Vec<HistoryEntry>, GitError> {
    let limit = query.limit.unwrap_or(usize::MAX);
    Ok(walk_history(repo)?
        .into_iter()
        .filter(|e| query.matches(e))
        .take(limit)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feat_commit() {
        let h = parse_conventional_header("feat: add new feature").unwrap();
        assert_eq!(h.commit_type, "feat");
        assert_eq!(h.scope, None);
        assert!(!h.breaking);
    }

    #[test]
    fn test_parse_fix_with_scope() {
        let h = parse_conventional_header("fix(auth): resolve login bug").unwrap();
        assert_eq!(h.commit_type, "fix");
        assert_eq!(h.scope.as_deref(), Some("auth"));
    }

    #[test]
    fn test_parse_breaking_with_exclamation() {
        assert!(parse_conventional_header("feat(api)!: drop v1").unwrap().breaking);
    }

    #[test]
    fn test_parse_breaking_in_footer() {
        let msg = "feat: add feature\n\nBREAKING CHANGE: this breaks things";
        assert!(parse_conventional_header(msg).unwrap().breaking);
    }

    #[test]
    fn test_parse_emoji_prefix() {
        let h = parse_conventional_header("✨ feat(ui): dark mode").unwrap();
        assert_eq!(h.commit_type, "feat");
        assert_eq!(h.scope.as_deref(), Some("ui"));
    }

    #[test]
    fn test_parse_custom_type_is_lowercased() {
        assert_eq!(
            parse_conventional_header("Security: rotate keys").unwrap().commit_type,
            "security"
        );
    }

    #[test]
    fn test_parse_non_conventional() {
        assert!(parse_conventional_header("just a normal commit message").is_none());
        assert!(parse_conventional_header("Merge branch 'main'").is_none());
    }

    fn entry(message: &str, author: &str) -> HistoryEntry {
        HistoryEntry {
            hash: "0123456789abcdef".to_string(),
            summary: message.lines().next().unwrap_or("").to_string(),
            message: message.to_string(),
            author: author.to_string(),
            email: format!("{}@example.com", author.to_lowercase()),
            timestamp: Utc::now(),
            header: parse_conventional_header(message),
        }
    }

    #[test]
    fn test_query_matching() {
        let e = entry("fix(db): close leaked connections", "Ada");

        assert!(HistoryQuery::default().matches(&e));
        assert!(HistoryQuery { text: Some("LEAKED".into()), ..Default::default() }.matches(&e));
        assert!(HistoryQuery { author: Some("ada@".into()), ..Default::default() }.matches(&e));
        assert!(HistoryQuery { commit_type: Some("Fix".into()), ..Default::default() }.matches(&e));
        assert!(!HistoryQuery { commit_type: Some("feat".into()), ..Default::default() }.matches(&e));
        assert!(!HistoryQuery { author: Some("grace".into()), ..Default::default() }.matches(&e));
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(entry("x", "a").short_hash(), "0123456");
    }
}
