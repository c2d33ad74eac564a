//! Interactive branch creation.

pub mod flow;

pub use flow::{BranchOptions, collect_branch_answers, run_branch};
