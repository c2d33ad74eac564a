//! Answers collected during one interactive commit session.

use std::collections::BTreeMap;

/// Values gathered from the user for a single commit.
///
/// Optional fields the user skipped are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAnswers {
    pub commit_type: String,
    pub scope: String,
    pub summary: String,
    pub body: String,
    pub footer: String,
    pub ticket: String,
    pub run_ci: bool,
    pub push: bool,
    /// Values for template placeholders beyond the built-in ones.
    pub custom: BTreeMap<String, String>,
}

impl Default for CommitAnswers {
    fn default() -> Self {
        Self {
            commit_type: String::new(),
            scope: String::new(),
            summary: String::new(),
            body: String::new(),
            footer: String::new(),
            ticket: String::new(),
            run_ci: true,
            push: false,
            custom: BTreeMap::new(),
        }
    }
}

/// Placeholder names the commit flow fills in itself.
pub const BUILTIN_PLACEHOLDERS: &[&str] = &[
    "type",
    "scope",
    "ticket",
    "ticketSeparator",
    "summary",
    "body",
    "footer",
    "emoji",
];

/// Whether a commit template placeholder is one of the built-in fields.
pub fn is_builtin_placeholder(name: &str) -> bool {
    BUILTIN_PLACEHOLDERS.contains(&name)
}
