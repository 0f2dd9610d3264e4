use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::Cli;

pub async fn run(cli: &Cli, output: &Path, names: &[String]) -> Result<()> {
    let (config, client) = super::connect(cli)?;
    let titles = super::fetch_titles(&client, &config, names).await?;

    let content = serde_json::to_string_pretty(&titles)?;
    std::fs::write(output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Saved {} titles to {}",
        "✓".green(),
        titles.len(),
        output.display()
    );
    Ok(())
}
