use async_trait::async_trait;

use crate::domain::{PlatformKey, SocialCredentials};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[async_trait]
pub trait CredentialsRepository: Send + Sync {
    async fn upsert(&self, credentials: &SocialCredentials)
    -> Result<UpsertOutcome, RepositoryError>;

    async fn find_by_platform(
        &self,
        platform: &PlatformKey,
    ) -> Result<Option<SocialCredentials>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("migration failed: {0}")]
    MigrationFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("invalid stored row: {0}")]
    InvalidRow(String),
}
