use async_trait::async_trait;

use crate::domain::{ContextEntry, Embedding};

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub entry: ContextEntry,
    pub distance: f32,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn add(
        &self,
        entries: &[ContextEntry],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError>;

    /// Nearest entries first.
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    async fn len(&self) -> Result<usize, VectorStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("dimension mismatch: index holds {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("entry/embedding count mismatch: {entries} entries, {embeddings} embeddings")]
    CountMismatch { entries: usize, embeddings: usize },
}
