use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::icon::render_uninstall_icon;

pub async fn run(cli: &Cli, name: &str, output: &Path) -> Result<()> {
    let (config, client) = super::connect(cli)?;
    let titles = super::fetch_titles(&client, &config, &[name.to_string()]).await?;

    let Some(icon) = titles
        .iter()
        .find(|t| t.name() == Some(name))
        .and_then(|t| t.icon_hires.as_deref())
    else {
        bail!("Title '{}' has no icon", name);
    };

    let png = render_uninstall_icon(icon)
        .with_context(|| format!("Could not process icon for title '{}'", name))?;
    std::fs::write(output, png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{} Wrote {}", "✓".green(), output.display());
    Ok(())
}
