use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub encryption: EncryptionSettings,
    pub sync: SyncSettings,
    pub deepgram: DeepgramSettings,
    pub llm: LlmSettings,
    #[serde(default)]
    pub news: NewsSettings,
    pub embeddings: EmbeddingsSettings,
    pub gatekeeper: GatekeeperSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncryptionSettings {
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncSettings {
    pub hf_token: Option<String>,
    pub dataset_repo: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub chat_model: String,
    pub temperature: f32,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub dimension: usize,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    Local,
    Hashing,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatekeeperSettings {
    pub threshold: f64,
    pub blocked_terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.{env}.toml`, then `APP__*` variables,
    /// then the plain provider variables (`DEEPGRAM_API_KEY`, ...).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 7860)?
            .set_default("server.max_upload_mb", 25)?
            .set_default("database.path", "./credentials.db")?
            .set_default("database.max_connections", 5)?
            .set_default("sync.dataset_repo", "JessicaKumar/voice-to-post-data")?
            .set_default("deepgram.api_key", "")?
            .set_default("deepgram.model", "nova-3")?
            .set_default("llm.api_key", "")?
            .set_default("llm.chat_model", "gemini-2.5-flash")?
            .set_default("llm.temperature", 0.7)?
            .set_default("embeddings.provider", "local")?
            .set_default("embeddings.dimension", 384)?
            .set_default("gatekeeper.threshold", 0.75)?
            .set_default(
                "gatekeeper.blocked_terms",
                crate::application::services::DEFAULT_BLOCKED_TERMS.to_vec(),
            )?
            .set_default("logging.level", "info,voice_to_post=debug,tower_http=debug")?
            .set_default("logging.json", environment == Environment::Prod)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("gatekeeper.blocked_terms")
                    .try_parsing(true),
            )
            .set_override_option("deepgram.api_key", env_var("DEEPGRAM_API_KEY"))?
            .set_override_option("llm.api_key", env_var("GEMINI_API_KEY"))?
            .set_override_option("news.api_key", env_var("NEWS_API_KEY"))?
            .set_override_option("encryption.key", env_var("ENCRYPTION_KEY"))?
            .set_override_option("sync.hf_token", env_var("HF_TOKEN"))?
            .set_override_option("server.port", env_var("PORT"))?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.deepgram.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "DEEPGRAM_API_KEY must be set in the environment".to_string(),
            ));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "GEMINI_API_KEY must be set in the environment".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.gatekeeper.threshold) {
            return Err(ConfigError::Message(format!(
                "gatekeeper.threshold must be within [0, 1], got {}",
                self.gatekeeper.threshold
            )));
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
