//! System git backend - zero dependencies
//!
//! Uses git plumbing commands for all operations:
//! - Safe subprocess execution (isolated environment)
//! - One subprocess call per metadata lookup (`git show -s --format=...`)
//! - Branch clones for fetching the published pages branch

use crate::core::error::{GitError, ResultExt, SiteError, SiteResult};
use crate::core::vcs::CommitMeta;
use chrono::DateTime;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> SiteResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(SiteError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(SiteError::message(format!("Failed to open git repository: {}", stderr)));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Commit metadata for `HEAD~offset`
  ///
  /// The build page pairs the n-th newest artifact with the n-th newest
  /// commit, so row lookups are always relative offsets from HEAD.
  pub fn commit_at_offset(&self, offset: usize) -> SiteResult<CommitMeta> {
    let spec = format!("HEAD~{}", offset);

    let output = self
      .git_cmd()
      .args(["show", "-s", "--format=%H%n%h%n%ci", &spec])
      .output()
      .context("Failed to read commit metadata")?;

    if !output.status.success() {
      return Err(SiteError::Git(GitError::CommitNotFound { spec }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_show_output(&stdout, &spec)
  }

  /// Clone one branch of a remote repository into `dest`
  ///
  /// Used to fetch the currently published pages branch. `dest` must not
  /// exist; callers remove stale scratch directories first.
  pub fn clone_branch(url: &str, branch: &str, dest: &Path) -> SiteResult<()> {
    let mut cmd = Command::new("git");
    isolate_env(&mut cmd);
    cmd
      .args(["clone", "--branch", branch, "--single-branch", url])
      .arg(dest);

    let output = cmd.output().context("Failed to execute git clone")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(SiteError::Git(GitError::CloneFailed {
        url: url.to_string(),
        branch: branch.to_string(),
        reason: stderr.trim().to_string(),
      }));
    }

    Ok(())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);
    isolate_env(&mut cmd);

    cmd
  }
}

/// Isolated environment (don't trust global config)
fn isolate_env(cmd: &mut Command) {
  cmd.env_clear();
  if let Ok(path) = std::env::var("PATH") {
    cmd.env("PATH", path);
  }
  if let Ok(home) = std::env::var("HOME") {
    cmd.env("HOME", home);
  }

  // Force safe behavior (override user config)
  cmd.arg("-c").arg("protocol.version=2");
  cmd.arg("-c").arg("advice.detachedHead=false");
  cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
}

/// Parse `git show -s --format=%H%n%h%n%ci` output
///
/// Three lines: full SHA, short SHA, committer date ("2024-01-15 13:45:12 +0100").
fn parse_show_output(stdout: &str, spec: &str) -> SiteResult<CommitMeta> {
  let mut lines = stdout.lines();

  let sha = lines
    .next()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .ok_or_else(|| SiteError::message(format!("Missing commit SHA for {}", spec)))?
    .to_string();
  let short_sha = lines
    .next()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .ok_or_else(|| SiteError::message(format!("Missing short SHA for {}", spec)))?
    .to_string();
  let date_line = lines
    .next()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .ok_or_else(|| SiteError::message(format!("Missing commit date for {}", spec)))?;

  let committed_at = DateTime::parse_from_str(date_line, "%Y-%m-%d %H:%M:%S %z")
    .with_context(|| format!("Unexpected commit date format for {}: '{}'", spec, date_line))?;

  Ok(CommitMeta {
    sha,
    short_sha,
    committed_at,
  })
}
