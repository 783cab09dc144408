mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, DeepgramSettings, EmbeddingProvider, EmbeddingsSettings,
    EncryptionSettings, GatekeeperSettings, LlmSettings, LoggingSettings, NewsSettings,
    ServerSettings, Settings, SyncSettings,
};
