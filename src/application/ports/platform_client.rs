use async_trait::async_trait;

use crate::domain::Platform;

#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn publish(
        &self,
        platform: Platform,
        client_id: &str,
        client_secret: &str,
        content: &str,
    ) -> Result<(), PlatformClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformClientError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
