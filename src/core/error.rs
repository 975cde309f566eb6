//! Error types for neutral-builds with contextual messages and exit codes
//!
//! Failures here are terminal: the tool is a one-shot CI step and the pipeline
//! re-runs it on the next trigger. Every error still carries a helpful
//! suggestion so the CI log points at the fix.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for neutral-builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, network, I/O)
  System = 2,
  /// Validation failure (missing artifact, malformed changelog)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for neutral-builds
#[derive(Debug)]
pub enum SiteError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Validation errors (artifacts, changelog)
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl SiteError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    SiteError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    SiteError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      SiteError::Message { message, context, help } => SiteError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => other,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      SiteError::Config(_) => ExitCode::User,
      SiteError::Git(_) => ExitCode::System,
      SiteError::Validation(_) => ExitCode::Validation,
      SiteError::Io(_) => ExitCode::System,
      SiteError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      SiteError::Config(e) => e.help_message(),
      SiteError::Git(e) => e.help_message(),
      SiteError::Validation(e) => e.help_message(),
      SiteError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for SiteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SiteError::Config(e) => write!(f, "{}", e),
      SiteError::Git(e) => write!(f, "{}", e),
      SiteError::Validation(e) => write!(f, "{}", e),
      SiteError::Io(e) => write!(f, "I/O error: {}", e),
      SiteError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for SiteError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SiteError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for SiteError {
  fn from(err: io::Error) -> Self {
    SiteError::Io(err)
  }
}

impl From<String> for SiteError {
  fn from(msg: String) -> Self {
    SiteError::message(msg)
  }
}

impl From<&str> for SiteError {
  fn from(msg: &str) -> Self {
    SiteError::message(msg)
  }
}

impl From<toml_edit::TomlError> for SiteError {
  fn from(err: toml_edit::TomlError) -> Self {
    SiteError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for SiteError {
  fn from(err: toml_edit::de::Error) -> Self {
    SiteError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for SiteError {
  fn from(err: toml_edit::ser::Error) -> Self {
    SiteError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for SiteError {
  fn from(err: serde_json::Error) -> Self {
    SiteError::message(format!("JSON error: {}", err))
  }
}

impl From<semver::Error> for SiteError {
  fn from(err: semver::Error) -> Self {
    SiteError::message(format!("Version parse error: {}", err))
  }
}

impl From<regex::Error> for SiteError {
  fn from(err: regex::Error) -> Self {
    SiteError::message(format!("Invalid pattern: {}", err))
  }
}

impl From<chrono::ParseError> for SiteError {
  fn from(err: chrono::ParseError) -> Self {
    SiteError::message(format!("Timestamp parse error: {}", err))
  }
}

impl From<std::str::Utf8Error> for SiteError {
  fn from(err: std::str::Utf8Error) -> Self {
    SiteError::message(format!("UTF-8 error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for SiteError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    SiteError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<anyhow::Error> for SiteError {
  fn from(err: anyhow::Error) -> Self {
    SiteError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// neutral.toml not found
  NotFound { root: PathBuf },

  /// Missing required field
  MissingField { field: String },

  /// A field holds a value that cannot work
  Invalid { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `neutral-builds init` to create a configuration file.".to_string()),
      ConfigError::Invalid { field, .. } => Some(format!("Fix the `{}` entry in neutral.toml.", field)),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { root } => {
        write!(
          f,
          "No neutral-builds configuration found.\nExpected file: {}/neutral.toml",
          root.display()
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::Invalid { field, reason } => {
        write!(f, "Invalid config field `{}`: {}", field, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Commit lookup failed (usually HEAD~n beyond history)
  CommitNotFound { spec: String },

  /// Cloning the pages branch failed
  CloneFailed {
    url: String,
    branch: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run from inside the source repository or pass --source: {}",
        path.display()
      )),
      GitError::CommitNotFound { .. } => Some(
        "The published page lists more builds than the source repository has commits. \
         Lower max_builds in neutral.toml or fetch the full history (no shallow clone)."
          .to_string(),
      ),
      GitError::CloneFailed { .. } => {
        Some("Check the site.repo slug and site.branch in neutral.toml, and network access to the host.".to_string())
      }
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::CommitNotFound { spec } => {
        write!(f, "Commit not found: {}", spec)
      }
      GitError::CloneFailed { url, branch, reason } => {
        write!(f, "Cloning {} (branch {}) failed: {}", url, branch, reason)
      }
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// No freshly built artifact matched the expected pattern
  MissingArtifact { pattern: String, dir: PathBuf },

  /// The changelog has no release heading to extract
  NoReleaseHeading { path: PathBuf },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::MissingArtifact { .. } => {
        Some("The packaging step must run first and leave its archive in place.".to_string())
      }
      ValidationError::NoReleaseHeading { .. } => {
        Some("Add a `## Release version X.Y.Z` heading to the changelog.".to_string())
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::MissingArtifact { pattern, dir } => {
        write!(f, "No artifact matching `{}` found in {}", pattern, dir.display())
      }
      ValidationError::NoReleaseHeading { path } => {
        write!(f, "No release heading found in {}", path.display())
      }
    }
  }
}

/// Result type alias for neutral-builds
pub type SiteResult<T> = Result<T, SiteError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> SiteResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> SiteResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<SiteError>,
{
  fn context(self, ctx: impl Into<String>) -> SiteResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> SiteResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &SiteError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
