//! Branch name rendering.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::config::PlaceholderConfig;

use super::placeholders::{placeholders, replace_first, token};
use super::sanitize::{collapse_runs, sanitize};

/// Prefix for branch names generated when the template renders empty.
pub const FALLBACK_PREFIX: &str = "new-branch-";

/// Exclusive upper bound for the fallback suffix.
pub const FALLBACK_RANGE: u32 = 10_000;

/// Source of the random suffix used for fallback branch names.
pub trait RandomSource {
    /// Return a value in `0..upper`.
    fn next_below(&mut self, upper: u32) -> u32;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_below(&mut self, upper: u32) -> u32 {
        rand::rng().random_range(0..upper)
    }
}

/// Render a branch name from `template`.
///
/// Each placeholder value is sanitized with its own [`PlaceholderConfig`]
/// (defaults when absent). Placeholders with an empty value are removed
/// together with one following `/` or `-`. When nothing is left after the
/// cleanup pass, a `new-branch-<n>` name is produced from `rng`.
pub fn render_branch_name(
    template: &str,
    answers: &BTreeMap<String, String>,
    configs: &BTreeMap<String, PlaceholderConfig>,
    rng: &mut impl RandomSource,
) -> String {
    let default_config = PlaceholderConfig::default();
    let mut name = template.to_string();

    for ph in placeholders(template) {
        let raw = answers.get(&ph).map(String::as_str).unwrap_or("");
        let config = configs.get(&ph).unwrap_or(&default_config);
        let value = sanitize(raw.trim(), config);

        if value.is_empty() {
            name = remove_placeholder(&name, &ph);
        } else {
            name = replace_first(&name, &ph, &value);
        }
    }

    let name = cleanup(&name);
    if name.is_empty() {
        let fallback = format!("{}{}", FALLBACK_PREFIX, rng.next_below(FALLBACK_RANGE));
        debug!("Branch template rendered empty, using {}", fallback);
        return fallback;
    }

    name
}

/// Drop an empty placeholder and the separator that follows it.
fn remove_placeholder(name: &str, ph: &str) -> String {
    let bare = token(ph);
    for candidate in [format!("{bare}/"), format!("{bare}-"), bare] {
        if name.contains(&candidate) {
            return name.replacen(&candidate, "", 1);
        }
    }
    name.to_string()
}

/// Collapse repeated separators and strip them from both ends.
fn cleanup(name: &str) -> String {
    let collapsed = collapse_runs(&collapse_runs(name, '/'), '-');
    let trimmed = collapsed.trim_matches(|c: char| c == '/' || c == '-');
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_string()
}
