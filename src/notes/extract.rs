//! First-release-section extraction
//!
//! Release sections in the changelog are delimited by headings matching
//! `## Release version X.Y.Z`. The extractor copies lines verbatim from the
//! first heading (inclusive) up to the second heading (exclusive); end of
//! file also closes the section, so a single-section changelog is valid.

use crate::core::error::{SiteError, SiteResult, ValidationError};
use regex::Regex;
use semver::Version;
use std::path::Path;

/// The first release section of a changelog
#[derive(Debug, Clone)]
pub struct ReleaseSection {
  /// Version parsed from the section heading
  pub version: Version,
  /// Section text, heading included, exactly as it appears in the changelog
  pub text: String,
}

fn heading_regex() -> Regex {
  // Unanchored at the end so trailing \r or heading suffixes don't matter
  Regex::new(r"^## Release version ([0-9]+\.[0-9]+\.[0-9]+)").expect("valid literal pattern")
}

/// Extract the first release section of `changelog`
///
/// Fails when the document contains no release heading at all; the original
/// script spun forever on that input.
pub fn extract_first_section(changelog: &str, changelog_path: &Path) -> SiteResult<ReleaseSection> {
  let heading = heading_regex();

  let mut version: Option<Version> = None;
  let mut text = String::new();

  // split_inclusive keeps the original line endings so the copy is verbatim
  for line in changelog.split_inclusive('\n') {
    if let Some(caps) = heading.captures(line) {
      if version.is_some() {
        break; // second heading: exclusive upper bound
      }
      version = Some(Version::parse(&caps[1]).map_err(SiteError::from)?);
      text.push_str(line);
    } else if version.is_some() {
      text.push_str(line);
    }
  }

  let version = version.ok_or_else(|| {
    SiteError::Validation(ValidationError::NoReleaseHeading {
      path: changelog_path.to_path_buf(),
    })
  })?;

  Ok(ReleaseSection { version, text })
}
