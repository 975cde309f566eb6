//! Git binary availability check

use super::trait_def::{Check, CheckContext, CheckResult};
use anyhow::Result;
use std::process::Command;

/// Check that a usable `git` binary is on PATH
pub struct GitBinaryCheck;

impl Check for GitBinaryCheck {
  fn name(&self) -> &str {
    "git-binary"
  }

  fn description(&self) -> &str {
    "Verifies the git binary is installed and runnable"
  }

  fn run(&self, _ctx: &CheckContext) -> Result<CheckResult> {
    match Command::new("git").arg("--version").output() {
      Ok(output) if output.status.success() => {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(CheckResult::pass(self.name(), version))
      }
      Ok(output) => Ok(CheckResult::error(
        self.name(),
        format!("git --version failed: {}", String::from_utf8_lossy(&output.stderr).trim()),
        Some("Reinstall git or fix the PATH entry pointing at it"),
      )),
      Err(err) => Ok(CheckResult::error(
        self.name(),
        format!("git not found: {}", err),
        Some("Install git and make sure it is on PATH"),
      )),
    }
  }
}
