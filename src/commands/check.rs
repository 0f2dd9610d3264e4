use anyhow::Result;
use colored::Colorize;

use crate::api::DefinitionsSource;
use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    let (config, client) = super::connect(cli)?;

    if cli.config.exists() {
        println!("{} Config is valid ({})", "✓".green(), cli.config.display());
    } else {
        println!(
            "{} No config file at {}, using flags and environment only.",
            "!".yellow(),
            cli.config.display()
        );
    }

    println!("{} Definitions source: {}", "✓".green(), client.source());

    if let DefinitionsSource::File(path) = client.source() {
        if !path.exists() {
            println!(
                "{} Definitions file does not exist: {}",
                "✗".red(),
                path.display()
            );
        }
    }

    println!("  Read timeout: {}s", config.timeout().as_secs());
    Ok(())
}
