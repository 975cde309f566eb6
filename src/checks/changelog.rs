//! Changelog readiness check

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::config::NeutralConfig;
use crate::notes::extract::extract_first_section;
use anyhow::Result;
use std::fs;

/// Check that the changelog exists and holds an extractable release section
pub struct ChangelogCheck;

impl Check for ChangelogCheck {
  fn name(&self) -> &str {
    "changelog"
  }

  fn description(&self) -> &str {
    "Verifies the changelog contains a release section"
  }

  fn run(&self, ctx: &CheckContext) -> Result<CheckResult> {
    // Without a config there is nothing to point at; the config check
    // already reports that failure
    let Ok(config) = NeutralConfig::load(&ctx.root) else {
      return Ok(CheckResult::warning(
        self.name(),
        "Skipped: no valid configuration",
        None,
      ));
    };

    let path = ctx.root.join(&config.changelog.file);
    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(err) => {
        return Ok(CheckResult::error(
          self.name(),
          format!("Cannot read {}: {}", path.display(), err),
          Some("Create the changelog or fix changelog.file in neutral.toml"),
        ));
      }
    };

    match extract_first_section(&content, &path) {
      Ok(section) => Ok(CheckResult::pass(
        self.name(),
        format!("Release section found for version {}", section.version),
      )),
      Err(err) => Ok(CheckResult::error(
        self.name(),
        err.to_string(),
        Some("Add a `## Release version X.Y.Z` heading to the changelog"),
      )),
    }
  }
}
