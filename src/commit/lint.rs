//! Commit message linting.

use std::fmt;

use crate::config::{LintRules, TypeCase};

/// A single rule breach in a candidate commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintViolation {
    SummaryTooLong { length: usize, max: usize },
    SummaryNotLowercase,
    MissingTicket,
}

impl fmt::Display for LintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintViolation::SummaryTooLong { length, max } => write!(
                f,
                "Summary is too long ({length} characters, max {max})"
            ),
            LintViolation::SummaryNotLowercase => {
                write!(f, "Summary must start with a lowercase character")
            }
            LintViolation::MissingTicket => {
                write!(f, "A ticket reference ('#') is required")
            }
        }
    }
}

/// Check a commit message against `rules`.
///
/// Violations are reported in a fixed order: length, case, ticket. An empty
/// result means the message passes.
pub fn lint(message: &str, rules: &LintRules) -> Vec<LintViolation> {
    let mut violations = Vec::new();
    let summary = message.split('\n').next().unwrap_or("").trim();

    let length = summary.chars().count();
    if length > rules.summary_max_length {
        violations.push(LintViolation::SummaryTooLong {
            length,
            max: rules.summary_max_length,
        });
    }

    if rules.type_case == Some(TypeCase::Lowercase)
        && let Some(first) = summary.chars().next()
        && !first.to_lowercase().eq(std::iter::once(first))
    {
        violations.push(LintViolation::SummaryNotLowercase);
    }

    if rules.required_ticket && !message.contains('#') {
        violations.push(LintViolation::MissingTicket);
    }

    violations
}
