//! Notes command: extract the release notes and stamp the artifacts
//!
//! Runs from a release tag: copies the first changelog section into the
//! release-notes file and renames the freshly built artifacts to carry the
//! released version.

use std::env;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::core::config::NeutralConfig;
use crate::core::error::{ResultExt, SiteResult};
use crate::notes::extract::extract_first_section;
use crate::notes::rename::{RenamedArtifact, apply_renames, plan_renames};

/// Machine-readable run summary for `--json`
#[derive(Serialize)]
struct NotesSummary {
  version: String,
  notes_file: String,
  dry_run: bool,
  renamed: Vec<RenamedArtifact>,
}

/// Run the notes command
pub fn run_notes(artifact_dir: &Path, dry_run: bool, json: bool) -> SiteResult<()> {
  let current_dir = env::current_dir()?;
  let config = NeutralConfig::load(&current_dir)?;

  let changelog_path = current_dir.join(&config.changelog.file);
  let changelog = fs::read_to_string(&changelog_path)
    .with_context(|| format!("Failed to read changelog from {}", changelog_path.display()))?;

  let section = extract_first_section(&changelog, &changelog_path)?;

  let notes_path = current_dir.join(&config.changelog.notes_file);
  if !dry_run {
    fs::write(&notes_path, &section.text)
      .with_context(|| format!("Failed to write release notes to {}", notes_path.display()))?;
  }

  // Plan all renames before applying any, so a missing artifact fails the
  // run with the directory untouched
  let files = list_dir(artifact_dir)?;
  let renames = plan_renames(&files, &config.site.platforms, &section.version, artifact_dir)?;
  if !dry_run {
    apply_renames(artifact_dir, &renames)?;
  }

  if json {
    let summary = NotesSummary {
      version: section.version.to_string(),
      notes_file: config.changelog.notes_file.display().to_string(),
      dry_run,
      renamed: renames,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    return Ok(());
  }

  println!("📝 Release version {}", section.version);
  println!(
    "📄 {} -> {}",
    config.changelog.file.display(),
    config.changelog.notes_file.display()
  );
  for rename in &renames {
    println!("📦 {} -> {}", rename.from, rename.to);
  }

  if dry_run {
    println!("\n🔍 Dry run: no notes written, no artifacts renamed");
  } else {
    println!("\n✅ Release notes and artifacts ready");
  }

  Ok(())
}

/// Entry names of `dir`, lexically sorted
fn list_dir(dir: &Path) -> SiteResult<Vec<String>> {
  let entries =
    fs::read_dir(dir).with_context(|| format!("Failed to read artifact directory {}", dir.display()))?;

  let mut files = Vec::new();
  for entry in entries {
    if let Some(name) = entry?.file_name().to_str() {
      files.push(name.to_string());
    }
  }
  files.sort_unstable();
  Ok(files)
}
