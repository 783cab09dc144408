use std::sync::Arc;

use crate::application::ports::{Embedder, EmbedderError, VectorStore, VectorStoreError};
use crate::domain::{ContextEntry, ContextMatch};

/// Distance reported when a search produced no hits.
pub const NO_CONTEXT_DISTANCE: f32 = -1.0;

pub struct ContextIndexService {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
}

impl ContextIndexService {
    pub fn new(embedder: Arc<dyn Embedder>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            vector_store,
        }
    }

    /// Embeds and indexes every non-blank text. Returns how many were added.
    pub async fn add_texts(&self, texts: &[String]) -> Result<usize, ContextIndexError> {
        let entries: Vec<ContextEntry> = texts
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| ContextEntry::new(t.to_string()))
            .collect();

        if entries.is_empty() {
            return Ok(0);
        }

        let inputs: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&inputs).await?;

        self.vector_store.add(&entries, &embeddings).await?;

        tracing::debug!(added = entries.len(), "Context entries indexed");
        Ok(entries.len())
    }

    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ContextMatch>, ContextIndexError> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        let results = self.vector_store.search(&query_embedding, top_k).await?;

        Ok(results
            .into_iter()
            .map(|r| ContextMatch {
                text: r.entry.text,
                distance: r.distance,
            })
            .collect())
    }

    pub async fn len(&self) -> Result<usize, ContextIndexError> {
        Ok(self.vector_store.len().await?)
    }
}

pub fn average_distance(matches: &[ContextMatch]) -> f32 {
    if matches.is_empty() {
        return NO_CONTEXT_DISTANCE;
    }
    matches.iter().map(|m| m.distance).sum::<f32>() / matches.len() as f32
}

#[derive(Debug, thiserror::Error)]
pub enum ContextIndexError {
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("vector store: {0}")]
    Storage(#[from] VectorStoreError),
}
