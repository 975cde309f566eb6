//! Check trait definition for health checks

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Context passed to each check
pub struct CheckContext {
  /// Root of the source repository (usually the current directory)
  pub root: PathBuf,

  /// Whether to run expensive checks (network access)
  pub thorough: bool,
}

/// Severity of a failed check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Info,
  Warning,
  Error,
}

/// Result of running one check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
  pub check_name: String,
  pub passed: bool,
  pub message: String,
  pub suggestion: Option<String>,
  pub severity: Severity,
}

impl CheckResult {
  /// A passing result
  pub fn pass(name: &str, message: impl Into<String>) -> Self {
    Self {
      check_name: name.to_string(),
      passed: true,
      message: message.into(),
      suggestion: None,
      severity: Severity::Info,
    }
  }

  /// A failing result with a fix suggestion
  pub fn error(name: &str, message: impl Into<String>, suggestion: Option<&str>) -> Self {
    Self {
      check_name: name.to_string(),
      passed: false,
      message: message.into(),
      suggestion: suggestion.map(String::from),
      severity: Severity::Error,
    }
  }

  /// A failing result that should not block the pipeline
  pub fn warning(name: &str, message: impl Into<String>, suggestion: Option<&str>) -> Self {
    Self {
      check_name: name.to_string(),
      passed: false,
      message: message.into(),
      suggestion: suggestion.map(String::from),
      severity: Severity::Warning,
    }
  }
}

/// A single health check
pub trait Check: Send + Sync {
  /// Short identifier shown in output
  fn name(&self) -> &str;

  /// One-line description of what the check verifies
  fn description(&self) -> &str;

  /// Run the check
  fn run(&self, ctx: &CheckContext) -> Result<CheckResult>;

  /// Whether this check is expensive (network); skipped unless --thorough
  fn is_expensive(&self) -> bool {
    false
  }
}
