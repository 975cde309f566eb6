pub mod system_git;

pub use system_git::SystemGit;

use chrono::{DateTime, FixedOffset};

/// Commit metadata for one build-page row
#[derive(Debug, Clone)]
pub struct CommitMeta {
  pub sha: String,
  pub short_sha: String,
  pub committed_at: DateTime<FixedOffset>,
}

impl CommitMeta {
  /// Date column value (YYYY-MM-DD)
  pub fn date(&self) -> String {
    self.committed_at.format("%Y-%m-%d").to_string()
  }

  /// Time column value (HH:MM:SS)
  pub fn time(&self) -> String {
    self.committed_at.format("%H:%M:%S").to_string()
  }
}
