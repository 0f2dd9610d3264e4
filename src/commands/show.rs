use anyhow::Result;

use crate::cli::Cli;
use crate::titles::{build_title_states, TitleState};

pub async fn run(cli: &Cli, names: &[String]) -> Result<()> {
    // An empty selection reads nothing rather than the whole catalog.
    let states: Vec<TitleState> = if names.is_empty() {
        Vec::new()
    } else {
        let (config, client) = super::connect(cli)?;
        let titles = super::fetch_titles(&client, &config, names).await?;
        build_title_states(&titles)?
    };

    println!("{}", serde_json::to_string_pretty(&states)?);
    Ok(())
}
