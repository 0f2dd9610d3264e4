use std::path::Path;
use std::sync::{Arc, Mutex};

use autoupdate_catalog::api::file::scan_for_titles;
use autoupdate_catalog::api::{CatalogClient, CatalogError, CatalogLogger, DefinitionsSource};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

const CATALOG_JSON: &str = r#"[
  {"title_name":"GoogleChrome","title_version":"1.0","patch_definition":{"requirements":[{"name":"Application Bundle ID","value":"com.google.Chrome"}]}},
  {"title_name":null,"title_version":"0.0"},
  {"title_name":"Firefox","title_version":"2.0"},
  {"title_name":"Slack2","title_version":"4.1"}
]"#;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn file_client(path: &Path) -> CatalogClient {
    CatalogClient::new(DefinitionsSource::from_settings(None, Some(path)).unwrap()).unwrap()
}

fn write_definitions(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("definitions.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn reads_whole_file_without_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(&dir, CATALOG_JSON);

    let titles = file_client(&path)
        .get_titles(&[], &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(titles.len(), 4);
    assert_eq!(titles[1].name(), None);
}

#[tokio::test]
async fn reads_requested_titles() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(&dir, CATALOG_JSON);

    let titles = file_client(&path)
        .get_titles(&names(&["Firefox", "GoogleChrome"]), &CancellationToken::new())
        .await
        .unwrap();

    // Document order, one record per name.
    let found: Vec<_> = titles.iter().map(|t| t.name().unwrap()).collect();
    assert_eq!(found, vec!["GoogleChrome", "Firefox"]);
}

#[tokio::test]
async fn match_is_exact_and_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(&dir, CATALOG_JSON);

    let err = file_client(&path)
        .get_titles(&names(&["firefox", "Slack"]), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        CatalogError::NotFound { missing } => assert_eq!(missing, names(&["Slack", "firefox"])),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_names_are_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(&dir, CATALOG_JSON);

    let err = file_client(&path)
        .get_titles(
            &names(&["Zoom", "GoogleChrome", "Atom"]),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.missing_titles(),
        Some(&names(&["Atom", "Zoom"])[..])
    );
}

#[tokio::test]
async fn duplicate_entries_yield_first_match() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(
        &dir,
        r#"[{"title_name":"Firefox","title_version":"1"},{"title_name":"Firefox","title_version":"2"}]"#,
    );

    let titles = file_client(&path)
        .get_titles(&names(&["Firefox", "Firefox"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].title_version.as_deref(), Some("1"));
}

#[tokio::test]
async fn elements_after_last_match_are_not_decoded_as_titles() {
    let dir = tempfile::tempdir().unwrap();
    // The second element is valid JSON but not a valid title.
    let path = write_definitions(
        &dir,
        r#"[{"title_name":"Firefox"},{"title_name":42,"icon_hires":[1,2,3]}]"#,
    );

    let titles = file_client(&path)
        .get_titles(&names(&["Firefox"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(titles.len(), 1);
}

#[tokio::test]
async fn non_array_document_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(&dir, r#"{"title_name":"Firefox"}"#);
    let client = file_client(&path);

    for request in [vec![], names(&["Firefox"])] {
        let err = client
            .get_titles(&request, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)), "got {err:?}");
    }
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(&dir, r#"[{"title_name":"Firefox"},"#);

    let err = file_client(&path)
        .get_titles(&names(&["GoogleChrome"]), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let err = file_client(&path)
        .get_titles(&[], &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        CatalogError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[cfg(unix)]
fn make_fifo(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("definitions.fifo");
    let status = std::process::Command::new("mkfifo")
        .arg(&path)
        .status()
        .unwrap();
    assert!(status.success());
    path
}

// A FIFO read blocks until a writer shows up. The writer runs on the same
// single-threaded runtime, so this only finishes if the read leaves it free.
#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn file_read_does_not_block_the_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let fifo = make_fifo(&dir);
    let client = file_client(&fifo);
    let cancel = CancellationToken::new();

    let wanted = names(&["Firefox"]);
    let (titles, _) = tokio::join!(client.get_titles(&wanted, &cancel), async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        std::fs::write(&fifo, CATALOG_JSON).unwrap();
    });

    let titles = titles.unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].name(), Some("Firefox"));
}

#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn cancellation_interrupts_pending_file_read() {
    let dir = tempfile::tempdir().unwrap();
    let fifo = make_fifo(&dir);
    let client = file_client(&fifo);
    let cancel = CancellationToken::new();

    let (result, _) = tokio::join!(client.get_titles(&[], &cancel), async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        cancel.cancel();
    });

    assert!(matches!(result, Err(CatalogError::Cancelled)), "got {result:?}");

    // Release the reader still parked on the FIFO so the runtime can shut down.
    std::fs::write(&fifo, "[]").unwrap();
}

#[derive(Clone, Default)]
struct InfoLogger {
    messages: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
}

impl CatalogLogger for InfoLogger {
    fn log_request(&self, _method: &Method, _url: &str) {}

    fn log_response(&self, _status: StatusCode, _headers: &HeaderMap, _body: &[u8]) {}

    fn log_info(&self, message: &str, fields: &[(&str, String)]) {
        self.messages.lock().unwrap().push((
            message.to_string(),
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));
    }
}

#[tokio::test]
async fn file_reads_are_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(&dir, CATALOG_JSON);
    let logger = InfoLogger::default();

    file_client(&path)
        .with_logger(logger.clone())
        .get_titles(&names(&["Firefox"]), &CancellationToken::new())
        .await
        .unwrap();

    let messages = logger.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "Reading titles from definitions file");
    assert!(messages[0]
        .1
        .contains(&("requested_titles".to_string(), "Firefox".to_string())));
}

#[test]
fn scan_reports_unmatched_names() {
    let (titles, missing) =
        scan_for_titles(CATALOG_JSON.as_bytes(), &names(&["Slack2", "Teams"])).unwrap();

    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].name(), Some("Slack2"));
    assert_eq!(missing.into_iter().collect::<Vec<_>>(), names(&["Teams"]));
}
