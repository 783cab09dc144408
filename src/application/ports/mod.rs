mod credentials_repository;
mod database_sync;
mod embedder;
mod llm_client;
mod news_source;
mod platform_client;
mod secret_cipher;
mod transcription_engine;
mod vector_store;

pub use credentials_repository::{CredentialsRepository, RepositoryError, UpsertOutcome};
pub use database_sync::{DatabaseSync, DatabaseSyncError, DownloadOutcome};
pub use embedder::{Embedder, EmbedderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use news_source::{NewsSource, NewsSourceError};
pub use platform_client::{PlatformClient, PlatformClientError};
pub use secret_cipher::{CipherError, SecretCipher};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use vector_store::{SearchResult, VectorStore, VectorStoreError};
