mod checks;
mod commands;
mod core;
mod notes;
mod site;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crate::core::error::{SiteError, print_error};

/// Neutral-build pages and release notes for CI pipelines
#[derive(Parser)]
#[command(name = "neutral-builds")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Scaffold a neutral.toml configuration in the current directory
  Init {
    /// Overwrite an existing configuration without asking
    #[arg(long)]
    force: bool,
  },

  /// Run health checks and diagnostics
  Doctor {
    /// Run thorough checks (includes network tests)
    #[arg(long)]
    thorough: bool,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Regenerate the neutral-builds listing page from the published branch
  Page {
    /// Order merged artifacts by: name (lexical) or mtime (modification time)
    #[arg(long, default_value = "name")]
    order: String,
    /// Repository to read commit metadata from (default: current directory)
    #[arg(long, default_value = ".")]
    source: PathBuf,
    /// Override the pages clone URL (useful for testing)
    #[arg(long)]
    remote: Option<String>,
    /// Show the plan without copying artifacts or writing documents
    #[arg(long)]
    dry_run: bool,
    /// Output a summary in JSON format (useful for CI/automation)
    #[arg(long)]
    json: bool,
  },

  /// Extract the first changelog section and version the fresh artifacts
  Notes {
    /// Directory containing the freshly built artifacts
    #[arg(long, default_value = ".")]
    artifact_dir: PathBuf,
    /// Show the plan without writing notes or renaming artifacts
    #[arg(long)]
    dry_run: bool,
    /// Output a summary in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Init { force } => commands::run_init(force),
    Commands::Doctor { thorough, json } => commands::run_doctor(thorough, json),
    Commands::Page {
      order,
      source,
      remote,
      dry_run,
      json,
    } => commands::run_page(&order, &source, remote, dry_run, json),
    Commands::Notes {
      artifact_dir,
      dry_run,
      json,
    } => commands::run_notes(&artifact_dir, dry_run, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: SiteError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
