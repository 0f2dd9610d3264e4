use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

/// Response bodies handed to [`CatalogLogger::log_response`] are cut at this length.
pub const MAX_LOGGED_BODY_BYTES: usize = 1024 * 1024;

/// Observes every request the catalog client makes and every file it reads.
pub trait CatalogLogger: Send + Sync {
    fn log_request(&self, method: &Method, url: &str);

    /// `body` is at most [`MAX_LOGGED_BODY_BYTES`] long.
    fn log_response(&self, status: StatusCode, headers: &HeaderMap, body: &[u8]);

    fn log_info(&self, message: &str, fields: &[(&str, String)]);
}

/// Forwards catalog events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl CatalogLogger for TracingLogger {
    fn log_request(&self, method: &Method, url: &str) {
        tracing::debug!(%method, url, "sending catalog request");
    }

    fn log_response(&self, status: StatusCode, headers: &HeaderMap, body: &[u8]) {
        tracing::debug!(
            status = status.as_u16(),
            headers = ?headers,
            body = %String::from_utf8_lossy(body),
            "received catalog response"
        );
    }

    fn log_info(&self, message: &str, fields: &[(&str, String)]) {
        let fields = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(fields = %fields, "{}", message);
    }
}

pub(crate) fn truncate_body(body: &[u8]) -> &[u8] {
    &body[..body.len().min(MAX_LOGGED_BODY_BYTES)]
}
