use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use voice_to_post::application::ports::{
    LlmClient, LlmClientError, TranscriptionEngine, TranscriptionError,
};
use voice_to_post::application::services::{
    ContextIndexService, CredentialsService, GenerationError, PipelineError, PipelineOutcome,
    PostGenerationService, PostPipeline, PublishingService, SafetyGatekeeper,
};
use voice_to_post::infrastructure::crypto::ChaChaSecretCipher;
use voice_to_post::infrastructure::llm::HashingEmbedder;
use voice_to_post::infrastructure::persistence::InMemoryVectorStore;
use voice_to_post::infrastructure::publishing::DryRunPlatformClient;
use voice_to_post::infrastructure::sync::DisabledDatabaseSync;

use crate::helpers::InMemoryCredentialsRepository;

struct CountingTranscriptionEngine {
    transcript: &'static str,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl TranscriptionEngine for CountingTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _content_type: &str,
    ) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.transcript.to_string())
    }
}

struct FixedLlmClient(Result<&'static str, ()>);

#[async_trait::async_trait]
impl LlmClient for FixedLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        self.0
            .map(str::to_string)
            .map_err(|_| LlmClientError::ApiRequestFailed("HTTP 500".to_string()))
    }
}

struct Fixture {
    pipeline: PostPipeline,
    engine: Arc<CountingTranscriptionEngine>,
    credentials: Arc<CredentialsService>,
    context_index: Arc<ContextIndexService>,
}

fn fixture(llm_reply: Result<&'static str, ()>) -> Fixture {
    let engine = Arc::new(CountingTranscriptionEngine {
        transcript: "Thinking about Rust async runtimes today",
        calls: AtomicUsize::new(0),
    });
    let credentials = Arc::new(CredentialsService::new(
        Arc::new(InMemoryCredentialsRepository::default()),
        Arc::new(ChaChaSecretCipher::generate()),
        Arc::new(DisabledDatabaseSync),
    ));
    let context_index = Arc::new(ContextIndexService::new(
        Arc::new(HashingEmbedder::new(64)),
        Arc::new(InMemoryVectorStore::new()),
    ));
    let pipeline = PostPipeline::new(
        engine.clone(),
        Arc::clone(&context_index),
        Arc::new(PostGenerationService::new(
            Arc::new(FixedLlmClient(llm_reply)),
            None,
        )),
        SafetyGatekeeper::default(),
        Arc::new(PublishingService::new(
            Arc::clone(&credentials),
            Arc::new(DryRunPlatformClient),
        )),
    );

    Fixture {
        pipeline,
        engine,
        credentials,
        context_index,
    }
}

#[tokio::test]
async fn given_clean_post_when_running_pipeline_then_publishes() {
    let f = fixture(Ok("Deep dive into async runtimes in Rust this week! #rust #async"));
    f.credentials.save_keys("twitter", "id-123456", "secret").await.unwrap();

    let outcome = f
        .pipeline
        .generate_post("twitter", b"audio", "audio/wav")
        .await
        .unwrap();

    let PipelineOutcome::Published {
        transcript,
        score,
        publish_result,
        ..
    } = outcome
    else {
        panic!("expected published outcome");
    };
    assert_eq!(transcript, "Thinking about Rust async runtimes today");
    assert!(score.passed);
    assert_eq!(score.context_score, 0.5);
    assert!(publish_result.is_success());
}

#[tokio::test]
async fn given_indexed_context_when_running_pipeline_then_context_score_reflects_distance() {
    let f = fixture(Ok("Deep dive into async runtimes in Rust this week! #rust #async"));
    f.context_index
        .add_texts(&["Thinking about Rust async runtimes today".to_string()])
        .await
        .unwrap();

    let outcome = f
        .pipeline
        .generate_post("twitter", b"audio", "audio/wav")
        .await
        .unwrap();

    let PipelineOutcome::Published { score, .. } = outcome else {
        panic!("expected published outcome");
    };
    assert!((score.context_score - 1.0).abs() < 1e-3);
}

#[tokio::test]
async fn given_unsafe_post_when_running_pipeline_then_rejects_without_publishing() {
    let f = fixture(Ok("Spread hate and violence everywhere #bad"));

    let outcome = f
        .pipeline
        .generate_post("twitter", b"audio", "audio/wav")
        .await
        .unwrap();

    let PipelineOutcome::Rejected { score } = outcome else {
        panic!("expected rejected outcome");
    };
    assert!(!score.passed);
    assert_eq!(score.safety_score, 0.0);
    assert_eq!(score.flagged_terms, vec!["hate", "violence"]);
    assert_eq!(score.threshold, f.pipeline.threshold());
}

#[tokio::test]
async fn given_blank_llm_reply_when_running_pipeline_then_rejects_with_zero_quality() {
    let f = fixture(Ok("   \n  "));
    f.credentials.save_keys("twitter", "id-123456", "secret").await.unwrap();

    let outcome = f
        .pipeline
        .generate_post("twitter", b"audio", "audio/wav")
        .await
        .unwrap();

    let PipelineOutcome::Rejected { score } = outcome else {
        panic!("expected rejected outcome");
    };
    assert!(!score.passed);
    assert_eq!(score.quality_score, 0.0);
    assert_eq!(score.final_score, 0.6);
}

#[tokio::test]
async fn given_empty_audio_when_running_pipeline_then_fails_before_transcription() {
    let f = fixture(Ok("unused #post"));

    let result = f.pipeline.generate_post("twitter", b"", "audio/wav").await;

    assert!(matches!(
        result,
        Err(PipelineError::Transcription(TranscriptionError::EmptyAudio))
    ));
    assert_eq!(f.engine.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_failing_llm_when_running_pipeline_then_returns_generation_error() {
    let f = fixture(Err(()));

    let result = f
        .pipeline
        .generate_post("twitter", b"audio", "audio/wav")
        .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Generation(GenerationError::Completion(_))
    ));
    assert!(err.to_string().starts_with("Error generating post:"));
}
