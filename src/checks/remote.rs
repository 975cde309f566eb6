//! Pages remote reachability check

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::config::NeutralConfig;
use anyhow::Result;
use std::process::Command;

/// Check that the pages repository and branch are reachable
///
/// Network access, so only run in thorough mode.
pub struct PagesRemoteCheck;

impl Check for PagesRemoteCheck {
  fn name(&self) -> &str {
    "pages-remote"
  }

  fn description(&self) -> &str {
    "Probes the pages repository for the published branch (network)"
  }

  fn is_expensive(&self) -> bool {
    true
  }

  fn run(&self, ctx: &CheckContext) -> Result<CheckResult> {
    let Ok(config) = NeutralConfig::load(&ctx.root) else {
      return Ok(CheckResult::warning(
        self.name(),
        "Skipped: no valid configuration",
        None,
      ));
    };

    let url = config.clone_url();
    let branch = &config.site.branch;

    let output = Command::new("git")
      .args(["ls-remote", "--heads", url.as_str(), branch.as_str()])
      .output();

    match output {
      Ok(output) if output.status.success() => {
        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
          Ok(CheckResult::error(
            self.name(),
            format!("Branch '{}' not found on {}", branch, url),
            Some("Fix site.branch in neutral.toml or push the pages branch"),
          ))
        } else {
          Ok(CheckResult::pass(
            self.name(),
            format!("Branch '{}' reachable on {}", branch, url),
          ))
        }
      }
      Ok(output) => Ok(CheckResult::error(
        self.name(),
        format!(
          "git ls-remote failed: {}",
          String::from_utf8_lossy(&output.stderr).trim()
        ),
        Some("Check the site.repo slug and network access to the host"),
      )),
      Err(err) => Ok(CheckResult::error(
        self.name(),
        format!("Failed to run git ls-remote: {}", err),
        Some("Install git and make sure it is on PATH"),
      )),
    }
  }
}
