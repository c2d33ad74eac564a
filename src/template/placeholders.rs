//! `{name}` token scanning.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex is valid"));

/// Distinct placeholder names in first-appearance order.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// The literal token for a placeholder name, e.g. `{summary}`.
pub fn token(name: &str) -> String {
    format!("{{{name}}}")
}

/// Replace the first occurrence of `{name}` with `value`.
pub fn replace_first(template: &str, name: &str, value: &str) -> String {
    template.replacen(&token(name), value, 1)
}

/// Substitute every placeholder in `template` from `values`.
///
/// Runs in a single pass over the template, so text coming from `values` is
/// never scanned for tokens. Only the first occurrence of each name is
/// replaced; repeats stay literal. Names missing from `values` render as the
/// empty string.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            if seen.insert(name.to_string()) {
                values.get(name).cloned().unwrap_or_default()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
