//! Ticket ID extraction from branch names.

use regex_lite::Regex;
use tracing::warn;

use crate::error::PatternError;

/// Compile a configured ticket pattern.
pub fn compile_ticket_pattern(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError {
        pattern: pattern.to_string(),
        source,
    })
}

/// Find a ticket ID in `branch_name` using `pattern`.
///
/// Returns the first full match. An empty pattern disables extraction; an
/// invalid pattern is logged and treated as no match.
pub fn extract_ticket(branch_name: &str, pattern: &str) -> Option<String> {
    if pattern.is_empty() {
        return None;
    }

    let re = match compile_ticket_pattern(pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("{}. Skipping ticket extraction.", e);
            return None;
        }
    };

    re.find(branch_name).map(|m| m.as_str().to_string())
}
