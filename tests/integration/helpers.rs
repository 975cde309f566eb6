//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A source repository paired with a local pages repository
///
/// The pages repository stands in for the remote the page command clones:
/// `site.repo` in the generated neutral.toml is its absolute path, so no
/// network access happens in tests.
pub struct TestSite {
  _root: TempDir,
  /// Source repository the CLI runs in
  pub path: PathBuf,
  /// Local pages repository with a gh-pages branch
  pub pages: PathBuf,
}

impl TestSite {
  /// Create a source repo with one commit and an empty pages branch
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("source");
    let pages = root.path().join("pages");

    // Source repository
    fs::create_dir_all(&path)?;
    git(&path, &["init", "--initial-branch=develop"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    fs::write(path.join("ReadMe.md"), "# Test project\n")?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;

    // Pages repository with its publishing branch checked out
    fs::create_dir_all(&pages)?;
    git(&pages, &["init", "--initial-branch=gh-pages"])?;
    git(&pages, &["config", "user.name", "Test User"])?;
    git(&pages, &["config", "user.email", "test@example.com"])?;
    fs::write(pages.join("index.md"), "# placeholder\n")?;
    git(&pages, &["add", "."])?;
    git(&pages, &["commit", "-m", "Initial page"])?;

    let site = Self {
      _root: root,
      path,
      pages,
    };
    site.write_config(10)?;
    Ok(site)
  }

  /// Write neutral.toml pointing at the local pages repository
  pub fn write_config(&self, max_builds: usize) -> Result<()> {
    let config = format!(
      r#"[site]
repo = "{repo}"
branch = "gh-pages"
output_dir = "neutral_builds"
scratch_dir = "current"
title = "Test Neutral Builds"
max_builds = {max_builds}
commit_base_url = "https://example.org/commit"

[[site.platforms]]
name = "Windows"
prefix = "gegelatilib"
extension = "zip"
"#,
      repo = self.pages.display(),
      max_builds = max_builds
    );
    fs::write(self.path.join("neutral.toml"), config)?;
    Ok(())
  }

  /// Add an empty commit to the source repository
  pub fn commit(&self, message: &str) -> Result<()> {
    git(&self.path, &["commit", "--allow-empty", "-m", message])?;
    Ok(())
  }

  /// Publish an artifact on the pages branch
  pub fn publish_artifact(&self, name: &str, content: &[u8]) -> Result<()> {
    fs::write(self.pages.join(name), content)?;
    git(&self.pages, &["add", "."])?;
    git(&self.pages, &[
      "commit",
      "-m",
      &format!("Add neutral build {}", name),
    ])?;
    Ok(())
  }

  /// Drop a fresh artifact into the output directory, like the CI build step
  pub fn write_fresh_artifact(&self, name: &str, content: &[u8]) -> Result<()> {
    let out_dir = self.path.join("neutral_builds");
    fs::create_dir_all(&out_dir)?;
    fs::write(out_dir.join(name), content)?;
    Ok(())
  }

  /// Check if a file exists relative to the source repository
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file relative to the source repository
  pub fn read_file(&self, path: &str) -> Result<String> {
    fs::read_to_string(self.path.join(path)).with_context(|| format!("Failed to read {}", path))
  }

  /// Read raw bytes relative to the source repository
  pub fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
    Ok(fs::read(self.path.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the neutral-builds CLI, expecting success
pub fn run_cli(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_cli_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "neutral-builds command failed: neutral-builds {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the neutral-builds CLI without checking the exit status
pub fn run_cli_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_neutral-builds");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run neutral-builds")
}
