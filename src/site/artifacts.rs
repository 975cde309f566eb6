//! Artifact filename patterns, retention and aliases
//!
//! Artifacts follow a fixed naming convention: `{prefix}-<dotted numeric
//! version>.{extension}`, e.g. `gegelatilib-1.2.0.205.zip`. The dotted tail
//! grows with the CI build number, so a lexical sort of the filenames is a
//! usable approximation of recency.

use crate::core::error::{SiteError, SiteResult};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Compiled filename patterns for one platform's artifacts
pub struct ArtifactPattern {
  prefix: String,
  extension: String,
  matcher: Regex,
  release: Regex,
}

impl ArtifactPattern {
  pub fn new(prefix: &str, extension: &str) -> SiteResult<Self> {
    let p = regex::escape(prefix);
    let e = regex::escape(extension);
    // Build artifacts carry a dotted numeric version of any depth. This
    // also matches the published X.Y.Z release alias, so an alias on the
    // pages branch re-enters the listing as a prior build.
    let matcher = Regex::new(&format!(r"^{}-([0-9]+\.)+{}$", p, e))?;
    // The released name truncates the version to its X.Y.Z prefix
    let release = Regex::new(&format!(r"^({}-[0-9]+\.[0-9]+\.[0-9]+)\..*$", p))?;

    Ok(Self {
      prefix: prefix.to_string(),
      extension: extension.to_string(),
      matcher,
      release,
    })
  }

  /// The matcher pattern, for error messages
  pub fn pattern(&self) -> &str {
    self.matcher.as_str()
  }

  pub fn matches(&self, name: &str) -> bool {
    self.matcher.is_match(name)
  }

  /// Release-version alias for a build artifact:
  /// `gegelatilib-1.2.0.205.zip` -> `gegelatilib-1.2.0.zip`
  ///
  /// Returns None when the filename has no X.Y.Z prefix to truncate to.
  pub fn release_alias(&self, name: &str) -> Option<String> {
    let alias = self
      .release
      .captures(name)
      .map(|caps| format!("{}.{}", &caps[1], self.extension))?;
    // An artifact that is already the bare X.Y.Z archive aliases to itself
    if alias == name { None } else { Some(alias) }
  }

  /// Filename carrying an exact release version, for the notes renamer
  pub fn versioned_name(&self, version: &semver::Version) -> String {
    format!("{}-{}.{}", self.prefix, version, self.extension)
  }
}

/// List entries of `dir` matching the pattern, lexically sorted ascending
/// (oldest first for build-numbered names).
pub fn scan_dir(dir: &Path, pattern: &ArtifactPattern) -> SiteResult<Vec<String>> {
  let entries = fs::read_dir(dir)
    .map_err(|e| SiteError::message(format!("Failed to read directory {}: {}", dir.display(), e)))?;

  let mut files = Vec::new();
  for entry in entries {
    let entry = entry?;
    if let Some(name) = entry.file_name().to_str()
      && pattern.matches(name)
    {
      files.push(name.to_string());
    }
  }

  files.sort_unstable();
  Ok(files)
}

/// Keep only the newest `max_builds - 1` prior builds; the fresh artifact
/// takes the remaining slot. Input must be sorted oldest-first.
pub fn retain_prior(mut files: Vec<String>, max_builds: usize) -> Vec<String> {
  let keep = max_builds.saturating_sub(1);
  if files.len() > keep {
    let excess = files.len() - keep;
    files.drain(0..excess);
  }
  files
}

/// Recency approximation used to order the retained prior builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
  /// Lexical filename sort (build numbers grow monotonically)
  Name,
  /// Filesystem modification time
  Mtime,
}

impl SortOrder {
  pub fn parse(s: &str) -> SiteResult<Self> {
    match s {
      "name" => Ok(SortOrder::Name),
      "mtime" => Ok(SortOrder::Mtime),
      other => Err(SiteError::with_help(
        format!("Unknown sort order '{}'", other),
        "Use --order name or --order mtime",
      )),
    }
  }
}

/// Merge prior builds with the fresh artifact, newest first.
///
/// The fresh artifact is pinned to the front: it is by definition the newest
/// build regardless of how its name or mtime compares. Prior entries carry
/// the on-disk path their mtime is read from (they may still live in the
/// scratch clone at this point).
pub fn merge_newest_first(mut prior: Vec<(String, PathBuf)>, fresh: String, order: SortOrder) -> Vec<String> {
  match order {
    SortOrder::Name => prior.sort_unstable_by(|a, b| a.0.cmp(&b.0)),
    SortOrder::Mtime => prior.sort_by(|a, b| {
      let ma = mtime_of(&a.1);
      let mb = mtime_of(&b.1);
      ma.cmp(&mb).then_with(|| a.0.cmp(&b.0))
    }),
  }

  let mut merged: Vec<String> = prior.into_iter().map(|(name, _)| name).collect();
  merged.push(fresh);
  merged.reverse();
  merged
}

fn mtime_of(path: &Path) -> SystemTime {
  fs::metadata(path)
    .and_then(|m| m.modified())
    .unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Artifact size in KiB, truncated (the page shows "Zip (123K)")
pub fn size_kib(path: &Path) -> SiteResult<u64> {
  let meta =
    fs::metadata(path).map_err(|e| SiteError::message(format!("Failed to stat {}: {}", path.display(), e)))?;
  Ok(meta.len() / 1024)
}
