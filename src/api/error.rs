use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("API request failed with status code: {}", .status.as_u16())]
    Status { status: StatusCode },

    #[error("error making request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("error decoding titles: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("error opening definitions file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The following titles were not found: {}", .missing.join(", "))]
    NotFound { missing: Vec<String> },

    #[error("definitions file read did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("request cancelled")]
    Cancelled,

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl CatalogError {
    /// Requested names that the source does not contain, when this is a lookup miss.
    pub fn missing_titles(&self) -> Option<&[String]> {
        match self {
            CatalogError::NotFound { missing } => Some(missing),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
