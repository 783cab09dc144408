use std::path::PathBuf;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::application::ports::{DatabaseSync, DatabaseSyncError, DownloadOutcome};

const DEFAULT_ENDPOINT: &str = "https://huggingface.co";
const COMMIT_MESSAGE: &str = "Update social credentials via backend";

/// Keeps the SQLite file in a Hugging Face dataset repository, since the
/// hosting container has no persistent disk.
pub struct HfDatasetSync {
    client: Client,
    token: String,
    endpoint: String,
    repo_id: String,
    local_path: PathBuf,
}

impl HfDatasetSync {
    pub fn new(
        token: String,
        repo_id: String,
        local_path: PathBuf,
        endpoint: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token,
            endpoint: endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
            repo_id,
            local_path,
        }
    }

    fn remote_filename(&self) -> String {
        self.local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "credentials.db".to_string())
    }
}

#[async_trait]
impl DatabaseSync for HfDatasetSync {
    #[tracing::instrument(skip(self), fields(repo = %self.repo_id))]
    async fn download(&self) -> Result<DownloadOutcome, DatabaseSyncError> {
        let filename = self.remote_filename();
        let url = format!(
            "{}/datasets/{}/resolve/main/{}",
            self.endpoint, self.repo_id, filename
        );

        tracing::info!(file = %filename, "Downloading database from dataset");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| DatabaseSyncError::RequestFailed(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::info!(file = %filename, "Database not found in dataset, a new one will be created");
            return Ok(DownloadOutcome::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DatabaseSyncError::RemoteStatus { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DatabaseSyncError::RequestFailed(e.to_string()))?;

        if let Some(parent) = self.local_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let partial = self.local_path.with_extension("download");
        tokio::fs::write(&partial, &bytes).await?;
        tokio::fs::rename(&partial, &self.local_path).await?;

        tracing::info!(bytes = bytes.len(), path = %self.local_path.display(), "Database downloaded");
        Ok(DownloadOutcome::Downloaded)
    }

    #[tracing::instrument(skip(self), fields(repo = %self.repo_id))]
    async fn upload(&self) -> Result<(), DatabaseSyncError> {
        let content = match tokio::fs::read(&self.local_path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DatabaseSyncError::MissingLocalFile(
                    self.local_path.display().to_string(),
                ));
            }
            Err(e) => return Err(DatabaseSyncError::Io(e)),
        };

        let header = json!({
            "key": "header",
            "value": { "summary": COMMIT_MESSAGE, "description": "" }
        });
        let file = json!({
            "key": "file",
            "value": {
                "content": STANDARD.encode(&content),
                "path": self.remote_filename(),
                "encoding": "base64"
            }
        });
        let body = format!("{}\n{}\n", header, file);

        let url = format!(
            "{}/api/datasets/{}/commit/main",
            self.endpoint, self.repo_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(|e| DatabaseSyncError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DatabaseSyncError::RemoteStatus { status, body });
        }

        tracing::info!(bytes = content.len(), "Database uploaded to dataset");
        Ok(())
    }
}

/// Used when no Hub token is configured.
pub struct DisabledDatabaseSync;

#[async_trait]
impl DatabaseSync for DisabledDatabaseSync {
    async fn download(&self) -> Result<DownloadOutcome, DatabaseSyncError> {
        tracing::warn!("HF_TOKEN not set, skipping cloud database download");
        Ok(DownloadOutcome::Skipped)
    }

    async fn upload(&self) -> Result<(), DatabaseSyncError> {
        tracing::warn!("HF_TOKEN not set, skipping cloud database upload");
        Ok(())
    }
}
