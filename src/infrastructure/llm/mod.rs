mod embedder_factory;
mod gemini_client;
mod hashing_embedder;
mod local_candle_embedder;
mod openai_embedder;

pub use embedder_factory::{EmbedderFactory, EmbedderFactoryError};
pub use gemini_client::GeminiClient;
pub use hashing_embedder::{DEFAULT_DIMENSION, HashingEmbedder};
pub use local_candle_embedder::{DEFAULT_LOCAL_MODEL, LocalCandleEmbedder};
pub use openai_embedder::OpenAiEmbedder;
