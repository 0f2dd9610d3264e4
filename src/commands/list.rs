use anyhow::Result;
use colored::Colorize;

use crate::cli::Cli;

pub async fn run(cli: &Cli) -> Result<()> {
    let (config, client) = super::connect(cli)?;
    let titles = super::fetch_titles(&client, &config, &[]).await?;

    println!("{}", "Titles".bold());
    println!("{:<32} {:<16} {:<10} Maximum OS", "Name", "Version", "Minimum OS");
    println!("{}", "-".repeat(80));
    for title in &titles {
        let name = title.name().unwrap_or("-");
        let version = title.title_version.as_deref().unwrap_or("-");
        let min_os = title.minimum_os.as_deref().unwrap_or("-");
        let max_os = title.maximum_os.as_deref().unwrap_or("-");
        println!("{:<32} {:<16} {:<10} {}", name, version, min_os, max_os);
    }
    println!("\nTotal: {}", titles.len());

    Ok(())
}
