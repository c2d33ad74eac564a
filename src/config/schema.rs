//! Configuration schema and built-in defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_COMMIT_TEMPLATE: &str =
    "{type}{scope}: {ticket}{ticketSeparator}{summary}\n\n{body}\n\n{footer}";
pub const DEFAULT_BRANCH_TEMPLATE: &str = "{type}/{ticketId}-{shortDesc}";
pub const DEFAULT_TICKET_PATTERN: &str = r"[A-Z]+-\d+";
pub const DEFAULT_SUMMARY_MAX_LENGTH: usize = 72;

/// A selectable commit category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTypeDef {
    #[serde(default)]
    pub emoji: String,
    pub value: String,
    #[serde(default)]
    pub description: String,
}

impl CommitTypeDef {
    pub fn new(emoji: &str, value: &str, description: &str) -> Self {
        Self {
            emoji: emoji.to_string(),
            value: value.to_string(),
            description: description.to_string(),
        }
    }

    /// Label shown in the type selection list.
    pub fn label(&self) -> String {
        if self.emoji.is_empty() {
            format!("{:<10} {}", self.value, self.description)
        } else {
            format!("{} {:<10} {}", self.emoji, self.value, self.description)
        }
    }
}

/// Case rule applied to the first character of the summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCase {
    Lowercase,
}

/// Commit message lint rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintRules {
    pub summary_max_length: usize,
    pub type_case: Option<TypeCase>,
    pub required_ticket: bool,
}

impl Default for LintRules {
    fn default() -> Self {
        Self {
            summary_max_length: DEFAULT_SUMMARY_MAX_LENGTH,
            type_case: Some(TypeCase::Lowercase),
            required_ticket: false,
        }
    }
}

/// Sanitization settings for a single branch template placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceholderConfig {
    pub lowercase: bool,
    pub separator: char,
    pub collapse_separator: bool,
    pub max_length: Option<usize>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            separator: '-',
            collapse_separator: true,
            max_length: None,
        }
    }
}

impl PlaceholderConfig {
    /// Parse one placeholder entry from its raw JSON value.
    pub fn from_value(name: &str, value: &Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value.clone()).map_err(|source| ConfigError::InvalidPlaceholder {
            name: name.to_string(),
            source,
        })
    }
}

/// Ticket prompting and extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketConfig {
    pub prompt: bool,
    pub pattern: String,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            prompt: true,
            pattern: DEFAULT_TICKET_PATTERN.to_string(),
        }
    }
}

/// Which optional questions the commit flow asks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptToggles {
    pub scope: bool,
    pub body: bool,
    pub footer: bool,
    pub ci: bool,
    pub push: bool,
}

impl Default for PromptToggles {
    fn default() -> Self {
        Self {
            scope: true,
            body: true,
            footer: false,
            ci: false,
            push: true,
        }
    }
}

/// Effective herald configuration. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub commit_types: Vec<CommitTypeDef>,
    pub commit_template: String,
    pub branch_template: String,
    /// Raw per-placeholder settings. Entries are parsed on use so a malformed
    /// entry only affects its own placeholder.
    pub placeholders: BTreeMap<String, Value>,
    pub lint: LintRules,
    pub ticket: TicketConfig,
    pub prompts: PromptToggles,
    pub suggest_type: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commit_types: default_commit_types(),
            commit_template: DEFAULT_COMMIT_TEMPLATE.to_string(),
            branch_template: DEFAULT_BRANCH_TEMPLATE.to_string(),
            placeholders: BTreeMap::new(),
            lint: LintRules::default(),
            ticket: TicketConfig::default(),
            prompts: PromptToggles::default(),
            suggest_type: true,
        }
    }
}

impl Config {
    /// Resolve the sanitization settings for every configured placeholder.
    ///
    /// Malformed entries are logged and replaced by the defaults.
    pub fn placeholder_configs(&self) -> BTreeMap<String, PlaceholderConfig> {
        self.placeholders
            .iter()
            .map(|(name, raw)| {
                let parsed = PlaceholderConfig::from_value(name, raw).unwrap_or_else(|e| {
                    warn!("{}. Using defaults.", e);
                    PlaceholderConfig::default()
                });
                (name.clone(), parsed)
            })
            .collect()
    }

    pub fn find_commit_type(&self, value: &str) -> Option<&CommitTypeDef> {
        self.commit_types.iter().find(|t| t.value == value)
    }
}

pub fn default_commit_types() -> Vec<CommitTypeDef> {
    vec![
        CommitTypeDef::new("✨", "feat", "A new feature"),
        CommitTypeDef::new("🐛", "fix", "A bug fix"),
        CommitTypeDef::new("📚", "docs", "Documentation only changes"),
        CommitTypeDef::new("💄", "style", "Formatting, missing semicolons, etc."),
        CommitTypeDef::new("♻️", "refactor", "Code change that neither fixes a bug nor adds a feature"),
        CommitTypeDef::new("⚡", "perf", "A code change that improves performance"),
        CommitTypeDef::new("✅", "test", "Adding or correcting tests"),
        CommitTypeDef::new("📦", "build", "Build system or external dependencies"),
        CommitTypeDef::new("👷", "ci", "CI configuration files and scripts"),
        CommitTypeDef::new("🔧", "chore", "Other changes that don't modify src or test files"),
        CommitTypeDef::new("🔒", "security", "Security fixes and hardening"),
        CommitTypeDef::new("⏪", "revert", "Reverts a previous commit"),
    ]
}
