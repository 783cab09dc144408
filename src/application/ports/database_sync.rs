use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded,
    NotFound,
    Skipped,
}

/// Mirrors the local database file to remote storage.
#[async_trait]
pub trait DatabaseSync: Send + Sync {
    async fn download(&self) -> Result<DownloadOutcome, DatabaseSyncError>;
    async fn upload(&self) -> Result<(), DatabaseSyncError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSyncError {
    #[error("local database file missing: {0}")]
    MissingLocalFile(String),
    #[error("remote request failed: {0}")]
    RequestFailed(String),
    #[error("remote returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
