//! Page command: regenerate the neutral-builds listing
//!
//! The pipeline mirrors the CI flow it replaces: the build step has already
//! dropped the fresh artifact into the output directory, this command merges
//! it with the builds currently published on the pages branch, regenerates the
//! listing documents and refreshes the stable aliases. A deploy step then
//! pushes the output directory back to the pages branch.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::config::NeutralConfig;
use crate::core::error::{ResultExt, SiteError, SiteResult, ValidationError};
use crate::core::vcs::SystemGit;
use crate::site::artifacts::{ArtifactPattern, SortOrder, merge_newest_first, retain_prior, scan_dir, size_kib};
use crate::site::render::{ArtifactCell, BuildRow, ColumnSpec, PageLayout, label_for, render_index, render_readme};

/// Machine-readable run summary for `--json`
#[derive(Serialize)]
struct PageSummary {
  title: String,
  branch: String,
  rows: usize,
  dry_run: bool,
  platforms: Vec<PlatformSummary>,
}

#[derive(Serialize)]
struct PlatformSummary {
  name: String,
  fresh: String,
  latest_alias: String,
  release_alias: Option<String>,
  builds: usize,
}

/// Run the page command
pub fn run_page(order: &str, source: &Path, remote: Option<String>, dry_run: bool, json: bool) -> SiteResult<()> {
  let current_dir = env::current_dir()?;
  let config = NeutralConfig::load(&current_dir)?;
  let order = SortOrder::parse(order)?;

  let out_dir = current_dir.join(&config.site.output_dir);
  let scratch = current_dir.join(&config.site.scratch_dir);

  // Locate every platform's fresh artifact before touching anything, so a
  // missing build fails the run with the output directory untouched
  let mut patterns = Vec::new();
  let mut fresh = Vec::new();
  for platform in &config.site.platforms {
    let pattern = ArtifactPattern::new(&platform.prefix, &platform.extension)?;
    let newest = scan_dir(&out_dir, &pattern)?.pop().ok_or_else(|| {
      SiteError::Validation(ValidationError::MissingArtifact {
        pattern: pattern.pattern().to_string(),
        dir: out_dir.clone(),
      })
    })?;
    patterns.push(pattern);
    fresh.push(newest);
  }

  if !json {
    println!("🌐 Regenerating {}", config.site.title);
  }

  // Fetch the currently published builds into the scratch clone. The clone
  // runs in dry-run mode too: the plan needs the published state.
  if scratch.exists() {
    fs::remove_dir_all(&scratch)
      .with_context(|| format!("Failed to remove stale scratch directory {}", scratch.display()))?;
  }
  let url = remote.unwrap_or_else(|| config.clone_url());
  if !json {
    println!("📥 Cloning {} (branch {})", url, config.site.branch);
  }
  SystemGit::clone_branch(&url, &config.site.branch, &scratch)?;

  // Per platform: cap the published builds, carry the survivors over, then
  // merge with the fresh artifact newest-first
  let mut merged: Vec<Vec<String>> = Vec::new();
  for (i, pattern) in patterns.iter().enumerate() {
    let prior = retain_prior(scan_dir(&scratch, pattern)?, config.site.max_builds);

    for name in &prior {
      if !dry_run {
        fs::copy(scratch.join(name), out_dir.join(name))
          .with_context(|| format!("Failed to carry over prior build {}", name))?;
      }
    }

    let entries: Vec<(String, PathBuf)> = prior
      .into_iter()
      .map(|name| {
        let path = scratch.join(&name);
        (name, path)
      })
      .collect();
    merged.push(merge_newest_first(entries, fresh[i].clone(), order));
  }

  let rows = build_rows(source, &merged, &out_dir, &scratch)?;

  let columns: Vec<ColumnSpec> = config
    .site
    .platforms
    .iter()
    .map(|p| ColumnSpec {
      name: p.name.clone(),
      latest_alias: p.latest_filename(),
      label: label_for(&p.extension),
    })
    .collect();
  let layout = PageLayout {
    title: &config.site.title,
    commit_base_url: &config.site.commit_base_url,
    columns: &columns,
  };

  if !dry_run {
    fs::write(out_dir.join("index.md"), render_index(&layout, &rows)).context("Failed to write index.md")?;
    fs::write(out_dir.join("ReadMe.md"), render_readme(&layout, &rows)).context("Failed to write ReadMe.md")?;
  }

  // Refresh the stable aliases for the newest artifact
  let mut platform_summaries = Vec::new();
  for (i, platform) in config.site.platforms.iter().enumerate() {
    let latest = platform.latest_filename();
    if !dry_run {
      fs::copy(out_dir.join(&fresh[i]), out_dir.join(&latest))
        .with_context(|| format!("Failed to alias {} to {}", fresh[i], latest))?;
    }

    let release = patterns[i].release_alias(&fresh[i]);
    match &release {
      Some(alias) => {
        if !dry_run {
          fs::copy(out_dir.join(&fresh[i]), out_dir.join(alias))
            .with_context(|| format!("Failed to alias {} to {}", fresh[i], alias))?;
        }
      }
      None => {
        eprintln!(
          "⚠️  {} has no X.Y.Z version prefix, skipping the release alias",
          fresh[i]
        );
      }
    }

    platform_summaries.push(PlatformSummary {
      name: platform.name.clone(),
      fresh: fresh[i].clone(),
      latest_alias: latest,
      release_alias: release,
      builds: merged[i].len(),
    });
  }

  if json {
    let summary = PageSummary {
      title: config.site.title.clone(),
      branch: config.site.branch.clone(),
      rows: rows.len(),
      dry_run,
      platforms: platform_summaries,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    return Ok(());
  }

  for summary in &platform_summaries {
    println!(
      "📦 {}: {} builds listed, newest {} -> {}",
      summary.name, summary.builds, summary.fresh, summary.latest_alias
    );
  }

  if dry_run {
    println!("\n🔍 Dry run: no artifacts copied, no documents written");
  } else {
    println!("\n✅ Listing regenerated in {}", out_dir.display());
  }

  Ok(())
}

/// Pair row `i` (newest first) with commit metadata for `HEAD~i`
///
/// Builds and commits land at the same cadence on the tracked branch, so the
/// i-th newest artifact is listed against the i-th newest commit.
fn build_rows(source: &Path, merged: &[Vec<String>], out_dir: &Path, scratch: &Path) -> SiteResult<Vec<BuildRow>> {
  let row_count = merged.iter().map(Vec::len).max().unwrap_or(0);
  let git = SystemGit::open(source)?;

  let mut rows = Vec::with_capacity(row_count);
  for i in 0..row_count {
    let meta = git.commit_at_offset(i)?;

    let mut cells = Vec::with_capacity(merged.len());
    for files in merged {
      match files.get(i) {
        Some(name) => {
          // Fresh artifacts live in the output directory, prior builds in
          // the scratch clone (dry runs never copy them over)
          let path = if out_dir.join(name).exists() {
            out_dir.join(name)
          } else {
            scratch.join(name)
          };
          cells.push(Some(ArtifactCell {
            file: name.clone(),
            size_kib: size_kib(&path)?,
          }));
        }
        None => cells.push(None),
      }
    }

    rows.push(BuildRow {
      date: meta.date(),
      time: meta.time(),
      short_sha: meta.short_sha,
      sha: meta.sha,
      cells,
    });
  }

  Ok(rows)
}
