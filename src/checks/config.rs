//! Configuration validity check

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::config::NeutralConfig;
use anyhow::Result;

/// Check that neutral.toml exists, parses and validates
pub struct ConfigCheck;

impl Check for ConfigCheck {
  fn name(&self) -> &str {
    "config"
  }

  fn description(&self) -> &str {
    "Validates the neutral.toml configuration"
  }

  fn run(&self, ctx: &CheckContext) -> Result<CheckResult> {
    if !NeutralConfig::exists(&ctx.root) {
      return Ok(CheckResult::error(
        self.name(),
        "No neutral.toml found",
        Some("Run `neutral-builds init` to create a configuration"),
      ));
    }

    match NeutralConfig::load(&ctx.root) {
      Ok(config) => Ok(CheckResult::pass(
        self.name(),
        format!(
          "Configuration valid ({} platform{}, {} builds retained)",
          config.site.platforms.len(),
          if config.site.platforms.len() == 1 { "" } else { "s" },
          config.site.max_builds
        ),
      )),
      Err(err) => Ok(CheckResult::error(
        self.name(),
        format!("Failed to load neutral.toml: {}", err),
        Some("Fix the reported field in neutral.toml"),
      )),
    }
  }
}
