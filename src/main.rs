use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use voice_to_post::application::ports::{DatabaseSync, NewsSource, SecretCipher};
use voice_to_post::application::services::{
    ContextIndexService, CredentialsService, PostGenerationService, PostPipeline,
    PublishingService, SafetyGatekeeper,
};
use voice_to_post::infrastructure::audio::DeepgramEngine;
use voice_to_post::infrastructure::crypto::ChaChaSecretCipher;
use voice_to_post::infrastructure::llm::{EmbedderFactory, GeminiClient};
use voice_to_post::infrastructure::news::NewsApiClient;
use voice_to_post::infrastructure::observability::{TracingConfig, init_tracing};
use voice_to_post::infrastructure::persistence::{
    InMemoryVectorStore, SqliteCredentialsRepository, create_pool,
};
use voice_to_post::infrastructure::publishing::DryRunPlatformClient;
use voice_to_post::infrastructure::sync::{DisabledDatabaseSync, HfDatasetSync};
use voice_to_post::presentation::{AppState, Environment, Settings, create_router};

const SAMPLE_CONTEXT: [&str; 3] = [
    "Welcome to Voice-To-Post backend!",
    "Vector databases help in doing semantic similarity search.",
    "FastAPI is a fast, highly performant web framework for building APIs.",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let database_sync: Arc<dyn DatabaseSync> = match settings.sync.hf_token.clone() {
        Some(token) => Arc::new(HfDatasetSync::new(
            token,
            settings.sync.dataset_repo.clone(),
            PathBuf::from(&settings.database.path),
            settings.sync.endpoint.clone(),
        )),
        None => Arc::new(DisabledDatabaseSync),
    };

    if let Err(e) = database_sync.download().await {
        tracing::error!(error = %e, "Failed to download database from dataset");
    }

    let pool = create_pool(&settings.database.url(), settings.database.max_connections).await?;

    let cipher: Arc<dyn SecretCipher> = match settings.encryption.key.as_deref() {
        Some(key) => Arc::new(ChaChaSecretCipher::from_base64_key(key)?),
        None => {
            tracing::warn!("ENCRYPTION_KEY not found, using a temporary runtime key");
            Arc::new(ChaChaSecretCipher::generate())
        }
    };

    let credentials_service = Arc::new(CredentialsService::new(
        Arc::new(SqliteCredentialsRepository::new(pool)),
        cipher,
        Arc::clone(&database_sync),
    ));

    let publishing = Arc::new(PublishingService::new(
        Arc::clone(&credentials_service),
        Arc::new(DryRunPlatformClient),
    ));

    let transcription_engine = Arc::new(DeepgramEngine::new(
        settings.deepgram.api_key.clone(),
        settings.deepgram.base_url.clone(),
        Some(settings.deepgram.model.clone()),
    ));

    let llm_client = Arc::new(GeminiClient::new(
        settings.llm.api_key.clone(),
        settings.llm.chat_model.clone(),
        settings.llm.temperature,
        settings.llm.base_url.clone(),
    ));

    let news_source: Option<Arc<dyn NewsSource>> = match settings.news.api_key.clone() {
        Some(key) => Some(Arc::new(NewsApiClient::new(
            key,
            settings.news.base_url.clone(),
        ))),
        None => {
            tracing::warn!("NEWS_API_KEY not found, news context will be disabled");
            None
        }
    };

    let embedder = EmbedderFactory::create(&settings.embeddings)?;
    let vector_store = Arc::new(InMemoryVectorStore::new());
    let context_index = Arc::new(ContextIndexService::new(embedder, vector_store));

    let samples: Vec<String> = SAMPLE_CONTEXT.iter().map(|s| s.to_string()).collect();
    match context_index.add_texts(&samples).await {
        Ok(n) => tracing::info!(entries = n, "Loaded sample data into the context index"),
        Err(e) => tracing::error!(error = %e, "Failed to seed the context index"),
    }

    let gatekeeper = SafetyGatekeeper::new(
        settings.gatekeeper.threshold,
        settings.gatekeeper.blocked_terms.clone(),
    );

    let pipeline = Arc::new(PostPipeline::new(
        transcription_engine,
        Arc::clone(&context_index),
        Arc::new(PostGenerationService::new(llm_client, news_source)),
        gatekeeper,
        publishing,
    ));

    let state = AppState {
        pipeline,
        credentials_service,
        context_index,
    };

    let router = create_router(state, settings.server.max_upload_mb * 1024 * 1024);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
