//! neutral.toml parsing and validation
//!
//! The original CI scripts hardcoded the pages repository, branch name, output
//! folder and retention count. Here they live in a small TOML file at the root
//! of the source repository, scaffolded by `neutral-builds init`.

use crate::core::error::{ConfigError, ResultExt, SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for neutral-builds
/// Searched in order: neutral.toml, .neutral.toml, .config/neutral.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeutralConfig {
  pub site: SiteConfig,
  #[serde(default)]
  pub changelog: ChangelogConfig,
}

/// Settings for the neutral-builds listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
  /// Pages repository slug, e.g. "gegelati/neutral-builds"
  pub repo: String,

  /// Branch the page is published on
  #[serde(default = "default_branch")]
  pub branch: String,

  /// Folder the CI build step writes the fresh artifact into; the regenerated
  /// documents and aliases land here too
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Scratch folder the published branch is cloned into
  #[serde(default = "default_scratch_dir")]
  pub scratch_dir: PathBuf,

  /// Page heading
  pub title: String,

  /// Maximum number of builds retained per platform
  #[serde(default = "default_max_builds")]
  pub max_builds: usize,

  /// Base URL commit links point at, e.g. "https://github.com/gegelati/gegelati/commit"
  pub commit_base_url: String,

  /// One table column per platform
  pub platforms: Vec<PlatformConfig>,
}

/// One artifact-producing platform (one column on the page)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
  /// Column header, e.g. "Windows"
  pub name: String,

  /// Artifact filename prefix, e.g. "gegelatilib"
  pub prefix: String,

  /// Artifact archive extension
  #[serde(default = "default_extension")]
  pub extension: String,

  /// Stable alias for the newest artifact
  /// (default: "{prefix}-latest-develop.{extension}")
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub latest_alias: Option<String>,
}

impl PlatformConfig {
  /// Filename the newest artifact is aliased to
  pub fn latest_filename(&self) -> String {
    self
      .latest_alias
      .clone()
      .unwrap_or_else(|| format!("{}-latest-develop.{}", self.prefix, self.extension))
  }
}

/// Settings for the release-note extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
  /// Changelog document scanned for release sections
  #[serde(default = "default_changelog_file")]
  pub file: PathBuf,

  /// Release-notes document the first section is copied into
  #[serde(default = "default_notes_file")]
  pub notes_file: PathBuf,
}

impl Default for ChangelogConfig {
  fn default() -> Self {
    Self {
      file: default_changelog_file(),
      notes_file: default_notes_file(),
    }
  }
}

fn default_branch() -> String {
  "gh-pages".to_string()
}

fn default_output_dir() -> PathBuf {
  PathBuf::from("neutral_builds")
}

fn default_scratch_dir() -> PathBuf {
  PathBuf::from("current")
}

fn default_max_builds() -> usize {
  10
}

fn default_extension() -> String {
  "zip".to_string()
}

fn default_changelog_file() -> PathBuf {
  PathBuf::from("Changelog.md")
}

fn default_notes_file() -> PathBuf {
  PathBuf::from("release_notes.md")
}

impl NeutralConfig {
  /// Find config file in search order: neutral.toml, .neutral.toml, .config/neutral.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("neutral.toml"),
      path.join(".neutral.toml"),
      path.join(".config").join("neutral.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config (searches multiple locations) and validate it
  pub fn load(path: &Path) -> SiteResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      SiteError::Config(ConfigError::NotFound {
        root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: NeutralConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Save config to neutral.toml (default location)
  pub fn save(&self, path: &Path) -> SiteResult<()> {
    let config_path = path.join("neutral.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  /// Validate field contents
  pub fn validate(&self) -> SiteResult<()> {
    if self.site.repo.is_empty() {
      return Err(SiteError::Config(ConfigError::MissingField {
        field: "site.repo".to_string(),
      }));
    }

    if !self.site.repo.starts_with("http") && !self.site.repo.contains('/') {
      return Err(SiteError::Config(ConfigError::Invalid {
        field: "site.repo".to_string(),
        reason: format!("expected an owner/name slug or a URL, got '{}'", self.site.repo),
      }));
    }

    if self.site.max_builds == 0 {
      return Err(SiteError::Config(ConfigError::Invalid {
        field: "site.max_builds".to_string(),
        reason: "must be at least 1".to_string(),
      }));
    }

    if self.site.commit_base_url.is_empty() {
      return Err(SiteError::Config(ConfigError::MissingField {
        field: "site.commit_base_url".to_string(),
      }));
    }

    if self.site.platforms.is_empty() {
      return Err(SiteError::Config(ConfigError::MissingField {
        field: "site.platforms".to_string(),
      }));
    }

    for platform in &self.site.platforms {
      if platform.name.is_empty() || platform.prefix.is_empty() {
        return Err(SiteError::Config(ConfigError::Invalid {
          field: "site.platforms".to_string(),
          reason: "every platform needs a name and a prefix".to_string(),
        }));
      }
    }

    let mut names: Vec<&str> = self.site.platforms.iter().map(|p| p.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    if names.len() != self.site.platforms.len() {
      return Err(SiteError::Config(ConfigError::Invalid {
        field: "site.platforms".to_string(),
        reason: "platform names must be unique".to_string(),
      }));
    }

    Ok(())
  }

  /// Clone URL for the pages repository
  ///
  /// Accepts either an owner/name slug (expanded to a GitHub https URL, like
  /// the original scripts did) or a full URL/local path for other hosts.
  pub fn clone_url(&self) -> String {
    let repo = &self.site.repo;
    if repo.contains("://") || repo.starts_with('/') || repo.starts_with('.') {
      repo.clone()
    } else {
      format!("https://github.com/{}.git", repo)
    }
  }

  /// Starter configuration written by `neutral-builds init`
  pub fn example() -> Self {
    Self {
      site: SiteConfig {
        repo: "gegelati/neutral-builds".to_string(),
        branch: default_branch(),
        output_dir: default_output_dir(),
        scratch_dir: default_scratch_dir(),
        title: "GEGELATI Neutral Builds".to_string(),
        max_builds: default_max_builds(),
        commit_base_url: "https://github.com/gegelati/gegelati/commit".to_string(),
        platforms: vec![PlatformConfig {
          name: "Windows".to_string(),
          prefix: "gegelatilib".to_string(),
          extension: default_extension(),
          latest_alias: None,
        }],
      },
      changelog: ChangelogConfig::default(),
    }
  }
}
