use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        content_type: &str,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("no audio data provided")]
    EmptyAudio,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("speech api returned status {0}")]
    ApiStatus(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
