pub mod error;
pub mod file;
pub mod logger;
pub mod models;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use tokio_util::sync::CancellationToken;
use url::Url;

pub use error::CatalogError;
pub use logger::{CatalogLogger, TracingLogger, MAX_LOGGED_BODY_BYTES};
use logger::truncate_body;
use models::Title;

/// Where title definitions come from. Exactly one origin is active per client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionsSource {
    Url(Url),
    File(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Exactly one of definitions url or definitions file must be set")]
    NotExactlyOne,

    #[error("invalid definitions url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("definitions url '{0}' cannot carry a path")]
    NotABase(String),
}

impl DefinitionsSource {
    /// Builds a source from optional settings. Empty strings count as unset.
    pub fn from_settings(url: Option<&str>, file: Option<&Path>) -> Result<Self, SourceError> {
        let url = url.filter(|u| !u.is_empty());
        let file = file.filter(|f| !f.as_os_str().is_empty());

        match (url, file) {
            (Some(raw), None) => {
                let parsed = Url::parse(raw).map_err(|source| SourceError::InvalidUrl {
                    url: raw.to_string(),
                    source,
                })?;
                if parsed.cannot_be_a_base() {
                    return Err(SourceError::NotABase(raw.to_string()));
                }
                Ok(DefinitionsSource::Url(parsed))
            }
            (None, Some(path)) => Ok(DefinitionsSource::File(path.to_path_buf())),
            _ => Err(SourceError::NotExactlyOne),
        }
    }
}

impl std::fmt::Display for DefinitionsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionsSource::Url(url) => write!(f, "url {}", url),
            DefinitionsSource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

pub struct CatalogClient {
    client: Client,
    source: DefinitionsSource,
    logger: Option<Arc<dyn CatalogLogger>>,
}

impl CatalogClient {
    pub fn new(source: DefinitionsSource) -> Result<Self, CatalogError> {
        Ok(Self {
            client: Client::builder().gzip(true).build()?,
            source,
            logger: None,
        })
    }

    pub fn with_logger(mut self, logger: impl CatalogLogger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn source(&self) -> &DefinitionsSource {
        &self.source
    }

    /// Retrieves titles by exact name. An empty `names` returns the whole catalog.
    ///
    /// Every requested name must be present in the result, otherwise the call
    /// fails with [`CatalogError::NotFound`] listing the missing names in sorted order.
    /// The call makes a single attempt and returns [`CatalogError::Cancelled`]
    /// as soon as `cancel` fires. A file read already in progress finishes on
    /// the blocking pool and its result is dropped.
    pub async fn get_titles(
        &self,
        names: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<Title>, CatalogError> {
        if cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }

        match &self.source {
            DefinitionsSource::File(path) => {
                let path = path.clone();
                let names = names.to_vec();
                let logger = self.logger.clone();
                let read = tokio::task::spawn_blocking(move || {
                    file::read_titles_file(&path, &names, logger.as_deref())
                });
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(CatalogError::Cancelled),
                    joined = read => joined?,
                }
            }
            DefinitionsSource::Url(base) => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(CatalogError::Cancelled),
                    result = self.fetch_titles(base, names) => result,
                }
            }
        }
    }

    /// [`get_titles`](Self::get_titles) bounded by a deadline.
    pub async fn get_titles_with_timeout(
        &self,
        names: &[String],
        timeout: Duration,
    ) -> Result<Vec<Title>, CatalogError> {
        let cancel = CancellationToken::new();
        match tokio::time::timeout(timeout, self.get_titles(names, &cancel)).await {
            Ok(result) => result,
            Err(_) => {
                cancel.cancel();
                Err(CatalogError::Timeout(timeout))
            }
        }
    }

    async fn fetch_titles(&self, base: &Url, names: &[String]) -> Result<Vec<Title>, CatalogError> {
        let url = titles_url(base, names);
        if let Some(logger) = &self.logger {
            logger.log_request(&Method::GET, url.as_str());
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                self.log_info("Failed to read response body", &[("error", e.to_string())]);
                return Err(e.into());
            }
        };

        if let Some(logger) = &self.logger {
            logger.log_response(status, &headers, truncate_body(&body));
        }

        if status != StatusCode::OK {
            return Err(CatalogError::Status { status });
        }

        let titles: Vec<Title> = serde_json::from_slice(&body)?;

        if !names.is_empty() {
            let missing = titles_missing(&titles, names);
            if !missing.is_empty() {
                return Err(CatalogError::NotFound { missing });
            }
        }

        Ok(titles)
    }

    fn log_info(&self, message: &str, fields: &[(&str, String)]) {
        if let Some(logger) = &self.logger {
            logger.log_info(message, fields);
        }
    }
}

/// `<base>` when unfiltered, otherwise `<base>/<name1>,<name2>,...` in caller order.
pub fn titles_url(base: &Url, names: &[String]) -> Url {
    let mut url = base.clone();
    if names.is_empty() {
        return url;
    }

    let joined = names.join(",");
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(&joined);
    }
    url
}

/// Requested names absent from `titles`, sorted and deduplicated.
pub fn titles_missing(titles: &[Title], requested: &[String]) -> Vec<String> {
    let found: BTreeSet<&str> = titles.iter().filter_map(Title::name).collect();

    requested
        .iter()
        .map(String::as_str)
        .filter(|name| !found.contains(name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
