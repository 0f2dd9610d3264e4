pub mod check;
pub mod icon;
pub mod init;
pub mod list;
pub mod show;
pub mod snapshot;

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::api::models::Title;
use crate::api::{CatalogClient, CatalogError, TracingLogger};
use crate::cli::Cli;
use crate::config::Config;

/// Loads the config and builds a client for whichever source it resolves to.
pub fn connect(cli: &Cli) -> Result<(Config, CatalogClient)> {
    let config = Config::load(&cli.config)?;
    let config_dir = cli.config.parent().unwrap_or(Path::new("."));
    let source = config.resolve_source(&cli.source_overrides(), config_dir)?;
    let client = CatalogClient::new(source)?.with_logger(TracingLogger);
    Ok((config, client))
}

/// Fetches titles within the configured timeout, turning lookup misses into a user-facing message.
pub async fn fetch_titles(
    client: &CatalogClient,
    config: &Config,
    names: &[String],
) -> Result<Vec<Title>> {
    let titles = client
        .get_titles_with_timeout(names, config.timeout())
        .await
        .map_err(|e| match e {
            CatalogError::NotFound { missing } => anyhow!(
                "Requested titles not found. The following titles do not exist: {}",
                missing.join(", ")
            ),
            other => anyhow!(other).context("Unable to read titles"),
        })?;

    tracing::debug!(count = titles.len(), source = %client.source(), "fetched titles");
    Ok(titles)
}
