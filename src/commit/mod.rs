//! Interactive conventional commits: answers, ticket lookup, type
//! suggestion, lint and the repair loop.

pub mod answers;
pub mod flow;
pub mod lint;
pub mod repair;
pub mod suggest;
pub mod ticket;

pub use answers::{BUILTIN_PLACEHOLDERS, CommitAnswers, is_builtin_placeholder};
pub use flow::{
    CommitOptions, CommitOutcome, collect_answers, ensure_staged, run_amend, run_commit, run_undo,
};
pub use lint::{LintViolation, lint};
pub use repair::{RepairState, repair_message, run_repair_loop};
pub use suggest::suggest_commit_type;
pub use ticket::{compile_ticket_pattern, extract_ticket};
