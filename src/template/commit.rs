//! Commit message rendering.

use std::collections::BTreeMap;

use crate::commit::answers::CommitAnswers;
use crate::config::CommitTypeDef;

use super::placeholders::render;

/// Trailer appended when the user opts out of CI for this commit.
pub const SKIP_CI_MARKER: &str = "[skip ci]";

/// Build the placeholder values for a commit message.
///
/// `scope` is wrapped in parentheses and `ticketSeparator` is `": "` only
/// when the underlying field is non-empty, so skipped fields vanish without
/// leaving punctuation behind.
pub fn commit_values(
    answers: &CommitAnswers,
    commit_types: &[CommitTypeDef],
) -> BTreeMap<String, String> {
    let mut values: BTreeMap<String, String> = answers
        .custom
        .iter()
        .map(|(k, v)| (k.clone(), v.trim().to_string()))
        .collect();

    let commit_type = answers.commit_type.trim();
    let scope = answers.scope.trim();
    let ticket = answers.ticket.trim();

    let emoji = commit_types
        .iter()
        .find(|t| t.value == commit_type)
        .map(|t| t.emoji.clone())
        .unwrap_or_default();

    let scope = if scope.is_empty() {
        String::new()
    } else {
        format!("({scope})")
    };
    let ticket_separator = if ticket.is_empty() { "" } else { ": " };

    values.insert("type".to_string(), commit_type.to_string());
    values.insert("scope".to_string(), scope);
    values.insert("ticket".to_string(), ticket.to_string());
    values.insert("ticketSeparator".to_string(), ticket_separator.to_string());
    values.insert("summary".to_string(), answers.summary.trim().to_string());
    values.insert("body".to_string(), answers.body.trim().to_string());
    values.insert("footer".to_string(), answers.footer.trim().to_string());
    values.insert("emoji".to_string(), emoji);

    values
}

/// Render the final commit message from a template and the session answers.
pub fn render_commit_message(
    template: &str,
    answers: &CommitAnswers,
    commit_types: &[CommitTypeDef],
) -> String {
    let values = commit_values(answers, commit_types);
    let mut message = render(template, &values).trim_end().to_string();

    if !answers.run_ci {
        message.push_str("\n\n");
        message.push_str(SKIP_CI_MARKER);
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_commit_types, schema::DEFAULT_COMMIT_TEMPLATE};

    fn answers(commit_type: &str, summary: &str) -> CommitAnswers {
        CommitAnswers {
            commit_type: commit_type.to_string(),
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_template_minimal() {
        let msg = render_commit_message(
            DEFAULT_COMMIT_TEMPLATE,
            &answers("feat", "add login"),
            &default_commit_types(),
        );
        assert_eq!(msg, "feat: add login");
    }

    #[test]
    fn test_default_template_full() {
        let a = CommitAnswers {
            commit_type: "fix".to_string(),
            scope: "auth".to_string(),
            summary: "handle expired tokens".to_string(),
            body: "Tokens were never refreshed.".to_string(),
            footer: "Closes #42".to_string(),
            ticket: "ABC-123".to_string(),
            ..Default::default()
        };
        let msg = render_commit_message(DEFAULT_COMMIT_TEMPLATE, &a, &default_commit_types());
        assert_eq!(
            msg,
            "fix(auth): ABC-123: handle expired tokens\n\nTokens were never refreshed.\n\nCloses #42"
        );
    }

    #[test]
    fn test_values_are_trimmed() {
        let a = CommitAnswers {
            commit_type: " docs ".to_string(),
            scope: "  ".to_string(),
            summary: "  fix typo  ".to_string(),
            ..Default::default()
        };
        let msg = render_commit_message("{type}{scope}: {summary}", &a, &[]);
        assert_eq!(msg, "docs: fix typo");
    }

    #[test]
    fn test_literal_punctuation_is_not_removed() {
        let msg = render_commit_message("{type}({scope}): {summary}", &answers("feat", "x"), &[]);
        assert_eq!(msg, "feat(): x");
    }

    #[test]
    fn test_emoji_and_custom_placeholders() {
        let mut a = answers("feat", "add search");
        a.custom.insert("issue".to_string(), " 77 ".to_string());
        let msg = render_commit_message(
            "{emoji} {type}: {summary} [{issue}] {unknown}",
            &a,
            &default_commit_types(),
        );
        assert_eq!(msg, "✨ feat: add search [77]");
    }

    #[test]
    fn test_skip_ci_marker() {
        let mut a = answers("chore", "bump deps");
        a.run_ci = false;
        let msg = render_commit_message("{type}: {summary}", &a, &[]);
        assert_eq!(msg, "chore: bump deps\n\n[skip ci]");
    }

    #[test]
    fn test_template_without_placeholders_is_unchanged() {
        let msg = render_commit_message("WIP", &answers("feat", "ignored"), &[]);
        assert_eq!(msg, "WIP");
    }
}
