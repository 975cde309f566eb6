//! Integration tests for `neutral-builds doctor`

use crate::helpers::{TestSite, run_cli, run_cli_raw};
use anyhow::Result;
use std::fs;

#[test]
fn test_doctor_passes_on_healthy_setup() -> Result<()> {
  let site = TestSite::new()?;
  fs::write(site.path.join("Changelog.md"), "## Release version 1.0.0\n- initial\n")?;

  let output = run_cli(&site.path, &["doctor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Running health checks"));
  assert!(stdout.contains("All checks passed"));

  Ok(())
}

#[test]
fn test_doctor_fails_without_config() -> Result<()> {
  let site = TestSite::new()?;
  fs::remove_file(site.path.join("neutral.toml"))?;

  let output = run_cli_raw(&site.path, &["doctor"])?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("No neutral.toml found"));

  Ok(())
}

#[test]
fn test_doctor_json_reports_each_check() -> Result<()> {
  let site = TestSite::new()?;
  fs::write(site.path.join("Changelog.md"), "## Release version 1.0.0\n- initial\n")?;

  let output = run_cli(&site.path, &["doctor", "--json"])?;
  let results: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  let results = results.as_array().expect("JSON array of check results");
  let names: Vec<&str> = results.iter().filter_map(|r| r["check_name"].as_str()).collect();

  assert!(names.contains(&"git-binary"));
  assert!(names.contains(&"config"));
  assert!(names.contains(&"changelog"));
  // Network probe only runs with --thorough
  assert!(!names.contains(&"pages-remote"));

  assert!(results.iter().all(|r| r["passed"].as_bool() == Some(true)));

  Ok(())
}

#[test]
fn test_doctor_thorough_probes_pages_remote() -> Result<()> {
  let site = TestSite::new()?;
  fs::write(site.path.join("Changelog.md"), "## Release version 1.0.0\n- initial\n")?;

  let output = run_cli(&site.path, &["doctor", "--thorough", "--json"])?;
  let results: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  let remote = results
    .as_array()
    .expect("JSON array of check results")
    .iter()
    .find(|r| r["check_name"] == "pages-remote")
    .expect("pages-remote result");

  // The config points at the local pages repository, so the probe succeeds
  assert_eq!(remote["passed"], true);

  Ok(())
}
