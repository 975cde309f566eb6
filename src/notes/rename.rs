//! Renaming fresh artifacts to carry the released version
//!
//! After the release notes are extracted, every build artifact matching a
//! platform pattern is renamed to `{prefix}-X.Y.Z.{extension}` so the upload
//! step publishes version-stamped archives.

use crate::core::config::PlatformConfig;
use crate::core::error::{SiteError, SiteResult, ValidationError};
use crate::site::artifacts::ArtifactPattern;
use semver::Version;
use std::fs;
use std::path::Path;

/// One planned rename
#[derive(Debug, Clone, serde::Serialize)]
pub struct RenamedArtifact {
  pub from: String,
  pub to: String,
}

/// Plan the renames for a directory listing
///
/// `files` are the entries of `dir`; the directory itself is only used for
/// error reporting, so planning stays pure and easy to test. Fails when
/// nothing matches any platform pattern: the packaging step did not run.
pub fn plan_renames(
  files: &[String],
  platforms: &[PlatformConfig],
  version: &Version,
  dir: &Path,
) -> SiteResult<Vec<RenamedArtifact>> {
  let mut renames = Vec::new();
  let mut matched_any = false;

  for platform in platforms {
    let pattern = ArtifactPattern::new(&platform.prefix, &platform.extension)?;
    let target = pattern.versioned_name(version);

    let matches: Vec<&String> = files.iter().filter(|f| pattern.matches(f)).collect();
    if matches.is_empty() {
      continue;
    }
    matched_any = true;

    // Only the newest build (lexically last, like the page command's fresh
    // pick) gets the release name. Stamping every match would rename older
    // leftovers onto the same target, overwriting it in turn.
    if let Some(file) = matches.into_iter().filter(|f| **f != target).max() {
      renames.push(RenamedArtifact {
        from: file.clone(),
        to: target,
      });
    }
  }

  if !matched_any {
    let patterns: Vec<String> = platforms
      .iter()
      .map(|p| format!("{}-*.{}", p.prefix, p.extension))
      .collect();
    return Err(SiteError::Validation(ValidationError::MissingArtifact {
      pattern: patterns.join(", "),
      dir: dir.to_path_buf(),
    }));
  }

  Ok(renames)
}

/// Apply planned renames inside `dir`
pub fn apply_renames(dir: &Path, renames: &[RenamedArtifact]) -> SiteResult<()> {
  for rename in renames {
    let from = dir.join(&rename.from);
    let to = dir.join(&rename.to);
    fs::rename(&from, &to)
      .map_err(|e| SiteError::message(format!("Failed to rename {} -> {}: {}", from.display(), to.display(), e)))?;
  }
  Ok(())
}
