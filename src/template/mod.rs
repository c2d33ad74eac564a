//! Placeholder templates for commit messages and branch names.

pub mod branch;
pub mod commit;
pub mod placeholders;
pub mod sanitize;

pub use branch::{FALLBACK_PREFIX, RandomSource, ThreadRandom, render_branch_name};
pub use commit::{SKIP_CI_MARKER, commit_values, render_commit_message};
pub use placeholders::{placeholders, render};
pub use sanitize::sanitize;
