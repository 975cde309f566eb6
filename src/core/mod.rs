//! Core building blocks shared by all commands:
//!
//! - **config**: neutral.toml parsing and validation
//! - **error**: error types with contextual help messages and exit codes
//! - **vcs**: git operations via the system git binary (SystemGit)

pub mod config;
pub mod error;
pub mod vcs;
