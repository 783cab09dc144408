use async_trait::async_trait;

use crate::domain::NewsArticle;

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn search(&self, query: &str, page_size: usize)
    -> Result<Vec<NewsArticle>, NewsSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NewsSourceError {
    #[error("news api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("news api returned status {status}: {message}")]
    ApiStatus { status: String, message: String },
    #[error("invalid news response: {0}")]
    InvalidResponse(String),
}
