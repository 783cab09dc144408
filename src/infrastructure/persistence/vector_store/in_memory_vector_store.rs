use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{SearchResult, VectorStore, VectorStoreError};
use crate::domain::{ContextEntry, Embedding};

/// Exact nearest-neighbour index using Euclidean distance.
///
/// The dimension is fixed either at construction or by the first insert.
pub struct InMemoryVectorStore {
    inner: RwLock<Index>,
}

struct Index {
    dimension: Option<usize>,
    entries: Vec<(ContextEntry, Embedding)>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Index {
                dimension: None,
                entries: Vec::new(),
            }),
        }
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            inner: RwLock::new(Index {
                dimension: Some(dimension),
                entries: Vec::new(),
            }),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_dimension(expected: usize, embedding: &Embedding) -> Result<(), VectorStoreError> {
    if embedding.dimensions() != expected {
        return Err(VectorStoreError::DimensionMismatch {
            expected,
            actual: embedding.dimensions(),
        });
    }
    Ok(())
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(
        &self,
        entries: &[ContextEntry],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if entries.len() != embeddings.len() {
            return Err(VectorStoreError::CountMismatch {
                entries: entries.len(),
                embeddings: embeddings.len(),
            });
        }

        let Some(first) = embeddings.first() else {
            return Ok(());
        };

        let mut index = self.inner.write().await;
        let dimension = index.dimension.unwrap_or(first.dimensions());

        // Validate the whole batch before touching the index.
        for embedding in embeddings {
            check_dimension(dimension, embedding)?;
        }

        index.dimension = Some(dimension);
        index.entries.extend(
            entries
                .iter()
                .cloned()
                .zip(embeddings.iter().cloned()),
        );

        tracing::debug!(total = index.entries.len(), "Vector index updated");
        Ok(())
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let index = self.inner.read().await;

        let Some(dimension) = index.dimension else {
            return Ok(Vec::new());
        };
        check_dimension(dimension, embedding)?;

        let mut results: Vec<SearchResult> = index
            .entries
            .iter()
            .filter_map(|(entry, stored)| {
                stored.l2_distance(embedding).map(|distance| SearchResult {
                    entry: entry.clone(),
                    distance,
                })
            })
            .collect();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(top_k);

        Ok(results)
    }

    async fn len(&self) -> Result<usize, VectorStoreError> {
        Ok(self.inner.read().await.entries.len())
    }
}
