//! Integration tests for `neutral-builds page`

use crate::helpers::{TestSite, run_cli, run_cli_raw};
use anyhow::Result;

#[test]
fn test_page_merges_published_builds_with_fresh_artifact() -> Result<()> {
  let site = TestSite::new()?;
  site.publish_artifact("gegelatilib-1.2.0.203.zip", b"old-203")?;
  site.publish_artifact("gegelatilib-1.2.0.204.zip", b"old-204")?;
  site.write_fresh_artifact("gegelatilib-1.2.0.205.zip", b"fresh-205")?;
  // One commit per listed build (HEAD~0, HEAD~1, HEAD~2)
  site.commit("build 204")?;
  site.commit("build 205")?;

  run_cli(&site.path, &["page"])?;

  let index = site.read_file("neutral_builds/index.md")?;
  assert!(index.contains("# Test Neutral Builds"));
  assert!(index.contains("gegelatilib-1.2.0.205.zip"));
  assert!(index.contains("gegelatilib-1.2.0.204.zip"));
  assert!(index.contains("gegelatilib-1.2.0.203.zip"));
  // Newest first
  let newest = index.find("gegelatilib-1.2.0.205.zip").unwrap();
  let older = index.find("gegelatilib-1.2.0.204.zip").unwrap();
  assert!(newest < older);

  let readme = site.read_file("neutral_builds/ReadMe.md")?;
  assert!(readme.contains("|Date|Time|Commit|Windows|"));
  assert!(readme.contains("| Latest |"));

  // Prior builds carried over from the published branch, byte-for-byte
  assert_eq!(site.read_bytes("neutral_builds/gegelatilib-1.2.0.204.zip")?, b"old-204");

  Ok(())
}

#[test]
fn test_page_aliases_newest_artifact() -> Result<()> {
  let site = TestSite::new()?;
  site.write_fresh_artifact("gegelatilib-1.2.0.205.zip", b"fresh-bytes")?;

  run_cli(&site.path, &["page"])?;

  // Stable latest alias and truncated release alias, both content-preserving
  assert_eq!(
    site.read_bytes("neutral_builds/gegelatilib-latest-develop.zip")?,
    b"fresh-bytes"
  );
  assert_eq!(site.read_bytes("neutral_builds/gegelatilib-1.2.0.zip")?, b"fresh-bytes");

  Ok(())
}

#[test]
fn test_page_caps_retained_builds() -> Result<()> {
  let site = TestSite::new()?;
  site.write_config(3)?;
  for n in 201..=204 {
    site.publish_artifact(&format!("gegelatilib-1.2.0.{}.zip", n), b"old")?;
  }
  site.write_fresh_artifact("gegelatilib-1.2.0.205.zip", b"fresh")?;
  site.commit("build 204")?;
  site.commit("build 205")?;

  run_cli(&site.path, &["page"])?;

  // max_builds = 3: the fresh build plus the two newest published ones
  let index = site.read_file("neutral_builds/index.md")?;
  assert!(index.contains("gegelatilib-1.2.0.205.zip"));
  assert!(index.contains("gegelatilib-1.2.0.204.zip"));
  assert!(index.contains("gegelatilib-1.2.0.203.zip"));
  assert!(!index.contains("gegelatilib-1.2.0.202.zip"));
  assert!(!index.contains("gegelatilib-1.2.0.201.zip"));

  // Dropped builds are never copied into the output directory
  assert!(!site.file_exists("neutral_builds/gegelatilib-1.2.0.202.zip"));

  Ok(())
}

#[test]
fn test_page_fails_without_fresh_artifact() -> Result<()> {
  let site = TestSite::new()?;
  std::fs::create_dir_all(site.path.join("neutral_builds"))?;

  let output = run_cli_raw(&site.path, &["page"])?;

  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No artifact matching"));

  Ok(())
}

#[test]
fn test_page_dry_run_writes_nothing() -> Result<()> {
  let site = TestSite::new()?;
  site.publish_artifact("gegelatilib-1.2.0.204.zip", b"old")?;
  site.write_fresh_artifact("gegelatilib-1.2.0.205.zip", b"fresh")?;
  site.commit("build 205")?;

  let output = run_cli(&site.path, &["page", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Dry run"));

  assert!(!site.file_exists("neutral_builds/index.md"));
  assert!(!site.file_exists("neutral_builds/ReadMe.md"));
  assert!(!site.file_exists("neutral_builds/gegelatilib-latest-develop.zip"));
  assert!(!site.file_exists("neutral_builds/gegelatilib-1.2.0.204.zip"));

  Ok(())
}

#[test]
fn test_page_json_summary() -> Result<()> {
  let site = TestSite::new()?;
  site.write_fresh_artifact("gegelatilib-1.2.0.205.zip", b"fresh")?;

  let output = run_cli(&site.path, &["page", "--json"])?;
  let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(summary["branch"], "gh-pages");
  assert_eq!(summary["rows"], 1);
  assert_eq!(summary["platforms"][0]["fresh"], "gegelatilib-1.2.0.205.zip");
  assert_eq!(summary["platforms"][0]["latest_alias"], "gegelatilib-latest-develop.zip");
  assert_eq!(summary["platforms"][0]["release_alias"], "gegelatilib-1.2.0.zip");

  Ok(())
}

#[test]
fn test_page_remote_override() -> Result<()> {
  let site = TestSite::new()?;
  // Point the config at a repository that does not exist; --remote wins
  let config = site.read_file("neutral.toml")?;
  let broken = config.replace(&site.pages.display().to_string(), "/nonexistent/pages");
  std::fs::write(site.path.join("neutral.toml"), broken)?;

  site.write_fresh_artifact("gegelatilib-1.2.0.205.zip", b"fresh")?;

  let remote = site.pages.display().to_string();
  run_cli(&site.path, &["page", "--remote", &remote])?;

  assert!(site.file_exists("neutral_builds/index.md"));
  Ok(())
}
