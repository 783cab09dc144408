use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use voice_to_post::application::ports::{DatabaseSync, DatabaseSyncError, DownloadOutcome};
use voice_to_post::infrastructure::sync::{DisabledDatabaseSync, HfDatasetSync};

use crate::helpers::start_mock_server;

const TOKEN: &str = "hf-test-token";
const REPO: &str = "someone/voice-data";
const REMOTE_DB: &[u8] = b"SQLite format 3\0remote contents";

type Commits = Arc<Mutex<Vec<String>>>;

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer hf-test-token")
}

fn mock_hub(file_exists: bool, commits: Commits) -> Router {
    Router::new()
        .route(
            "/datasets/someone/voice-data/resolve/main/credentials.db",
            get(move |headers: HeaderMap| async move {
                if !is_authorized(&headers) {
                    return StatusCode::UNAUTHORIZED.into_response();
                }
                if !file_exists {
                    return (StatusCode::NOT_FOUND, "Entry not found").into_response();
                }
                (StatusCode::OK, REMOTE_DB).into_response()
            }),
        )
        .route(
            "/api/datasets/someone/voice-data/commit/main",
            post(
                |State(commits): State<Commits>, headers: HeaderMap, body: String| async move {
                    if !is_authorized(&headers) {
                        return StatusCode::UNAUTHORIZED.into_response();
                    }
                    commits.lock().unwrap().push(body);
                    (StatusCode::OK, r#"{"success":true}"#).into_response()
                },
            ),
        )
        .with_state(commits)
}

#[tokio::test]
async fn given_remote_database_when_downloading_then_writes_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let local_path = dir.path().join("data").join("credentials.db");
    let (base_url, shutdown_tx) = start_mock_server(mock_hub(true, Commits::default())).await;

    let sync = HfDatasetSync::new(
        TOKEN.to_string(),
        REPO.to_string(),
        local_path.clone(),
        Some(base_url),
    );

    let outcome = sync.download().await.unwrap();

    assert_eq!(outcome, DownloadOutcome::Downloaded);
    assert_eq!(std::fs::read(&local_path).unwrap(), REMOTE_DB);
    assert!(!local_path.with_extension("download").exists());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_remote_database_when_downloading_then_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let local_path = dir.path().join("credentials.db");
    let (base_url, shutdown_tx) = start_mock_server(mock_hub(false, Commits::default())).await;

    let sync = HfDatasetSync::new(
        TOKEN.to_string(),
        REPO.to_string(),
        local_path.clone(),
        Some(base_url),
    );

    let outcome = sync.download().await.unwrap();

    assert_eq!(outcome, DownloadOutcome::NotFound);
    assert!(!local_path.exists());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_invalid_token_when_downloading_then_returns_remote_status() {
    let dir = tempfile::tempdir().unwrap();
    let (base_url, shutdown_tx) = start_mock_server(mock_hub(true, Commits::default())).await;

    let sync = HfDatasetSync::new(
        "wrong".to_string(),
        REPO.to_string(),
        dir.path().join("credentials.db"),
        Some(base_url),
    );

    let result = sync.download().await;

    assert!(matches!(
        result,
        Err(DatabaseSyncError::RemoteStatus { status: 401, .. })
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_local_database_when_uploading_then_commits_base64_file() {
    let dir = tempfile::tempdir().unwrap();
    let local_path = dir.path().join("credentials.db");
    std::fs::write(&local_path, b"local sqlite bytes").unwrap();
    let commits = Commits::default();
    let (base_url, shutdown_tx) = start_mock_server(mock_hub(true, commits.clone())).await;

    let sync = HfDatasetSync::new(
        TOKEN.to_string(),
        REPO.to_string(),
        local_path,
        Some(base_url),
    );

    sync.upload().await.unwrap();

    let commits = commits.lock().unwrap();
    assert_eq!(commits.len(), 1);
    let lines: Vec<Value> = commits[0]
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["key"], "header");
    assert_eq!(
        lines[0]["value"]["summary"],
        "Update social credentials via backend"
    );
    assert_eq!(lines[1]["key"], "file");
    assert_eq!(lines[1]["value"]["path"], "credentials.db");
    assert_eq!(lines[1]["value"]["encoding"], "base64");
    let content = lines[1]["value"]["content"].as_str().unwrap();
    assert_eq!(STANDARD.decode(content).unwrap(), b"local sqlite bytes");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_local_database_when_uploading_then_returns_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let sync = HfDatasetSync::new(
        TOKEN.to_string(),
        REPO.to_string(),
        dir.path().join("absent.db"),
        Some("http://127.0.0.1:9".to_string()),
    );

    let result = sync.upload().await;

    assert!(matches!(result, Err(DatabaseSyncError::MissingLocalFile(_))));
}

#[tokio::test]
async fn given_disabled_sync_when_used_then_skips_quietly() {
    let sync = DisabledDatabaseSync;

    assert_eq!(sync.download().await.unwrap(), DownloadOutcome::Skipped);
    assert!(sync.upload().await.is_ok());
}
