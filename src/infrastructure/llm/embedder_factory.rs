use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

use super::{DEFAULT_LOCAL_MODEL, HashingEmbedder, LocalCandleEmbedder, OpenAiEmbedder};

pub struct EmbedderFactory;

#[derive(Debug, thiserror::Error)]
pub enum EmbedderFactoryError {
    #[error("missing API key: remote embedder requires embeddings.api_key")]
    MissingApiKey,
    #[error("missing model: remote embedder requires embeddings.model")]
    MissingModel,
    #[error("model initialization failed: {0}")]
    InitializationFailed(String),
}

impl EmbedderFactory {
    pub fn create(settings: &EmbeddingsSettings) -> Result<Arc<dyn Embedder>, EmbedderFactoryError> {
        match settings.provider {
            EmbeddingProvider::Local => {
                let model = settings
                    .model
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(DEFAULT_LOCAL_MODEL);
                let embedder = LocalCandleEmbedder::new(model)
                    .map_err(|e| EmbedderFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(embedder))
            }
            EmbeddingProvider::Hashing => {
                tracing::info!(dimension = settings.dimension, "Using local hashing embedder");
                Ok(Arc::new(HashingEmbedder::new(settings.dimension)))
            }
            EmbeddingProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or(EmbedderFactoryError::MissingApiKey)?;
                let model = settings
                    .model
                    .clone()
                    .filter(|m| !m.is_empty())
                    .ok_or(EmbedderFactoryError::MissingModel)?;
                tracing::info!(model = %model, "Using remote embedding model");
                Ok(Arc::new(OpenAiEmbedder::new(
                    key,
                    model,
                    settings.base_url.clone(),
                )))
            }
        }
    }
}
