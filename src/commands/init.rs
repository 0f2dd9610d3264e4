use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::config::Config;

pub fn run(cli: &Cli) -> Result<()> {
    if cli.config.exists() {
        bail!(
            "{} already exists. Remove it first or pass --config to pick another path.",
            cli.config.display()
        );
    }

    std::fs::write(&cli.config, Config::default_template())
        .with_context(|| format!("Failed to write {}", cli.config.display()))?;

    println!("{} Created {}", "✓".green(), cli.config.display());
    println!("  Set definitions.url or definitions.file, then run `autoupdate-catalog check`.");
    Ok(())
}
