use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";
const DEFAULT_MODEL: &str = "nova-3";
const DEFAULT_CONTENT_TYPE: &str = "audio/wav";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct DeepgramEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl DeepgramEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Deserialize)]
struct ListenResults {
    channels: Vec<Channel>,
}

#[derive(Deserialize)]
struct Channel {
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct Alternative {
    transcript: String,
}

#[async_trait]
impl TranscriptionEngine for DeepgramEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        content_type: &str,
    ) -> Result<String, TranscriptionError> {
        if audio_data.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }

        let url = format!("{}/v1/listen", self.base_url);
        let content_type = if content_type.trim().is_empty() {
            DEFAULT_CONTENT_TYPE
        } else {
            content_type
        };

        tracing::debug!(model = %self.model, bytes = audio_data.len(), "Sending audio to Deepgram");

        let response = self
            .client
            .post(&url)
            .query(&[("model", self.model.as_str()), ("smart_format", "true")])
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.api_key))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(audio_data.to_vec())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::error!(status = %status, body = %body, "Deepgram returned an error");
            return Err(TranscriptionError::ApiStatus(status.as_u16()));
        }

        let result: ListenResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        let transcript = result
            .results
            .channels
            .into_iter()
            .next()
            .and_then(|c| c.alternatives.into_iter().next())
            .map(|a| a.transcript)
            .ok_or_else(|| {
                TranscriptionError::InvalidResponse("no transcript alternatives".to_string())
            })?;

        tracing::info!(chars = transcript.len(), "Deepgram transcription completed");

        Ok(transcript.trim().to_string())
    }
}
