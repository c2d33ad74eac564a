//! Configuration: schema, defaults and file loading.

pub mod loader;
pub mod schema;

pub use loader::{
    CONFIG_ENV_VAR, CONFIG_FILE_NAME, ConfigSource, load_config, load_or_default,
    resolve_config_path, write_default_config,
};
pub use schema::{
    CommitTypeDef, Config, LintRules, PlaceholderConfig, PromptToggles, TicketConfig, TypeCase,
    default_commit_types,
};
