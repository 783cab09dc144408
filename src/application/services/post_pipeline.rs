use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::application::services::{
    ContextIndexError, ContextIndexService, GenerationError, PostGenerationService,
    PublishingService, SafetyGatekeeper, average_distance,
};
use crate::domain::{PublishOutcome, SafetyScore};

pub const CONTEXT_TOP_K: usize = 3;

/// Voice memo in, gated social post out.
pub struct PostPipeline {
    transcription_engine: Arc<dyn TranscriptionEngine>,
    context_index: Arc<ContextIndexService>,
    generation: Arc<PostGenerationService>,
    gatekeeper: SafetyGatekeeper,
    publishing: Arc<PublishingService>,
}

#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    Published {
        transcript: String,
        generated_post: String,
        score: SafetyScore,
        publish_result: PublishOutcome,
    },
    Rejected {
        score: SafetyScore,
    },
}

impl PostPipeline {
    pub fn new(
        transcription_engine: Arc<dyn TranscriptionEngine>,
        context_index: Arc<ContextIndexService>,
        generation: Arc<PostGenerationService>,
        gatekeeper: SafetyGatekeeper,
        publishing: Arc<PublishingService>,
    ) -> Self {
        Self {
            transcription_engine,
            context_index,
            generation,
            gatekeeper,
            publishing,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.gatekeeper.threshold()
    }

    #[tracing::instrument(skip(self, audio), fields(audio_bytes = audio.len()))]
    pub async fn generate_post(
        &self,
        platform: &str,
        audio: &[u8],
        content_type: &str,
    ) -> Result<PipelineOutcome, PipelineError> {
        if audio.is_empty() {
            return Err(PipelineError::Transcription(TranscriptionError::EmptyAudio));
        }

        let transcript = self
            .transcription_engine
            .transcribe(audio, content_type)
            .await
            .map_err(PipelineError::Transcription)?;
        tracing::debug!(chars = transcript.len(), "Audio transcribed");

        let matches = self
            .context_index
            .search(&transcript, CONTEXT_TOP_K)
            .await
            .map_err(PipelineError::Context)?;
        let avg_distance = average_distance(&matches);

        let generated_post = self
            .generation
            .generate(&transcript, &matches)
            .await
            .map_err(PipelineError::Generation)?;

        let score = self.gatekeeper.evaluate(&generated_post, avg_distance);
        tracing::info!(
            final_score = score.final_score,
            passed = score.passed,
            "Gatekeeper verdict"
        );

        if !score.passed {
            return Ok(PipelineOutcome::Rejected { score });
        }

        let publish_result = self.publishing.publish(platform, &generated_post).await;

        Ok(PipelineOutcome::Published {
            transcript,
            generated_post,
            score,
            publish_result,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Error transcribing audio: {0}")]
    Transcription(TranscriptionError),
    #[error("Error retrieving context: {0}")]
    Context(ContextIndexError),
    #[error("{0}")]
    Generation(GenerationError),
}
