//! Integration tests for `neutral-builds init`

use crate::helpers::{TestSite, run_cli, run_cli_raw};
use anyhow::Result;
use std::fs;

#[test]
fn test_init_scaffolds_config() -> Result<()> {
  let site = TestSite::new()?;
  fs::remove_file(site.path.join("neutral.toml"))?;

  let output = run_cli(&site.path, &["init"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Created neutral.toml"));

  let config = site.read_file("neutral.toml")?;
  assert!(config.contains("[site]"));
  assert!(config.contains("[[site.platforms]]"));

  Ok(())
}

#[test]
fn test_init_force_overwrites_existing_config() -> Result<()> {
  let site = TestSite::new()?;
  fs::write(site.path.join("neutral.toml"), "# stale\n")?;

  run_cli(&site.path, &["init", "--force"])?;

  let config = site.read_file("neutral.toml")?;
  assert!(config.contains("[site]"));
  assert!(!config.contains("# stale"));

  Ok(())
}

#[test]
fn test_init_prompt_declined_keeps_existing_config() -> Result<()> {
  let site = TestSite::new()?;
  let before = site.read_file("neutral.toml")?;

  // Empty stdin reads as "no" at the overwrite prompt
  let output = run_cli_raw(&site.path, &["init"])?;
  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Aborted"));

  assert_eq!(site.read_file("neutral.toml")?, before);
  Ok(())
}
