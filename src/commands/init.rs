//! Init command: scaffold a starter neutral.toml

use std::env;
use std::io::{self, Write};

use crate::core::config::NeutralConfig;
use crate::core::error::SiteResult;

/// Run the init command to set up the neutral-builds configuration
pub fn run_init(force: bool) -> SiteResult<()> {
  let current_dir = env::current_dir()?;

  // Check if config already exists
  if NeutralConfig::exists(&current_dir) && !force {
    print!("⚠️  Configuration already exists. Overwrite? [y/N]: ");
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    if !response.trim().eq_ignore_ascii_case("y") {
      println!("Aborted.");
      return Ok(());
    }
  }

  let config = NeutralConfig::example();
  config.save(&current_dir)?;

  println!("✅ Created neutral.toml");
  println!("\nNext steps:");
  println!("  1. Set site.repo to your pages repository (owner/name)");
  println!("  2. Set site.title and site.commit_base_url for your project");
  println!("  3. Adjust the [[site.platforms]] entries to your artifact names");
  println!("  4. Run `neutral-builds doctor` to verify the setup");

  Ok(())
}
