//! Health checks for the doctor command
//!
//! Each check verifies one precondition of the page or notes pipeline and
//! reports a pass/fail with a fix suggestion instead of failing the run.

mod changelog;
mod config;
mod git_bin;
mod remote;
mod runner;
mod trait_def;

pub use runner::create_default_runner;
pub use trait_def::{CheckContext, Severity};
