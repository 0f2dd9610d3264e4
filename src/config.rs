use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::DefinitionsSource;

pub const DEFAULT_CONFIG_NAME: &str = "autoupdate.toml";

pub const ENV_DEFINITIONS_URL: &str = "AUTOUPDATE_DEFINITIONS_URL";
pub const ENV_DEFINITIONS_FILE: &str = "AUTOUPDATE_DEFINITIONS_FILE";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub definitions: DefinitionsConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DefinitionsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Local definitions file, relative to the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Read timeout in seconds (default: 90)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    90
}

/// Source settings given on the command line. They take precedence over the config file.
#[derive(Debug, Default)]
pub struct SourceOverrides {
    pub url: Option<String>,
    pub file: Option<PathBuf>,
}

impl Config {
    /// Loads the config. A missing file is treated as an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.definitions.timeout)
    }

    /// Picks the definitions source.
    ///
    /// Command-line flags win outright when either is given. Otherwise each
    /// field comes from the config file, falling back to the environment for
    /// that field alone, so a config `url` plus an environment `file` is
    /// rejected rather than silently preferring one.
    pub fn resolve_source(
        &self,
        overrides: &SourceOverrides,
        config_dir: &Path,
    ) -> Result<DefinitionsSource> {
        self.resolve_source_with(overrides, config_dir, |key| std::env::var(key).ok())
    }

    pub fn resolve_source_with<F>(
        &self,
        overrides: &SourceOverrides,
        config_dir: &Path,
        getenv: F,
    ) -> Result<DefinitionsSource>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (url, file) = if overrides.url.is_some() || overrides.file.is_some() {
            (overrides.url.clone(), overrides.file.clone())
        } else {
            let url = self
                .definitions
                .url
                .clone()
                .filter(|u| !u.is_empty())
                .or_else(|| getenv(ENV_DEFINITIONS_URL));
            let file = self
                .definitions
                .file
                .as_ref()
                .filter(|f| !f.as_os_str().is_empty())
                .map(|f| config_dir.join(f))
                .or_else(|| getenv(ENV_DEFINITIONS_FILE).map(PathBuf::from));
            (url, file)
        };

        let source = DefinitionsSource::from_settings(url.as_deref(), file.as_deref())
            .context("Invalid definitions configuration")?;
        Ok(source)
    }

    pub fn default_template() -> String {
        r#"# autoupdate-catalog configuration

[definitions]
# Set exactly one of `url` or `file`.
url = "https://example.com/api/v1/titles"
# file = "definitions.json"   # local snapshot, relative to this file
timeout = 90                  # seconds
"#
        .to_string()
    }
}
