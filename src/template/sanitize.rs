//! Free-text to branch-segment sanitization.

use crate::config::PlaceholderConfig;

/// Sanitize user input for use inside a branch name.
///
/// Steps, in order:
/// 1. whitespace becomes the separator
/// 2. anything other than ASCII letters, digits, `_` or the separator is dropped
/// 3. lowercase (unless disabled)
/// 4. runs of separators collapse to one (unless disabled)
/// 5. hard truncation to `max_length` characters
pub fn sanitize(input: &str, options: &PlaceholderConfig) -> String {
    let sep = options.separator;

    let mut result: String = input
        .chars()
        .map(|c| if c.is_whitespace() { sep } else { c })
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c == sep)
        .collect();

    if options.lowercase {
        result = result.to_lowercase();
    }

    if options.collapse_separator {
        result = collapse_runs(&result, sep);
    }

    if let Some(max) = options.max_length {
        if let Some((idx, _)) = result.char_indices().nth(max) {
            result.truncate(idx);
        }
    }

    result
}

/// Replace every run of two or more `ch` with a single `ch`.
pub(crate) fn collapse_runs(input: &str, ch: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_was_ch = false;
    for c in input.chars() {
        if c == ch {
            if !prev_was_ch {
                out.push(c);
            }
            prev_was_ch = true;
        } else {
            out.push(c);
            prev_was_ch = false;
        }
    }
    out
}
