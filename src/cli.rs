use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::SourceOverrides;

#[derive(Parser)]
#[command(
    name = "autoupdate-catalog",
    about = "Look up auto-update catalog titles and synthesize their uninstall icons"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true, default_value = "autoupdate.toml")]
    pub config: PathBuf,

    /// Base URL of the definitions API
    #[arg(long, global = true, conflicts_with = "definitions_file")]
    pub definitions_url: Option<String>,

    /// Local JSON file containing definitions
    #[arg(long, global = true)]
    pub definitions_file: Option<PathBuf>,

    /// Log requests and responses (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn source_overrides(&self) -> SourceOverrides {
        SourceOverrides {
            url: self.definitions_url.clone(),
            file: self.definitions_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config file
    Init,

    /// Validate the config and show which definitions source is active
    Check,

    /// List every title in the catalog
    List,

    /// Print the named titles, with derived fields, as JSON
    Show {
        /// Exact, case-sensitive title names
        names: Vec<String>,
    },

    /// Write the uninstall icon of a title to a PNG file
    Icon {
        /// Exact title name
        name: String,

        /// Destination PNG path
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Save titles from the active source as a local definitions file
    Snapshot {
        /// Destination JSON path
        #[arg(long, short)]
        output: PathBuf,

        /// Only include these titles (default: all)
        names: Vec<String>,
    },
}
