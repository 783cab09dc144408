use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::TranscriptionError;
use crate::application::services::{PipelineError, PipelineOutcome};
use crate::domain::{PublishOutcome, SafetyScore};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;

const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/wav";

#[derive(Serialize)]
pub struct GatekeeperScore {
    pub safety_score: f64,
    pub quality_score: f64,
    pub context_score: f64,
    pub final_score: f64,
    pub threshold: f64,
    pub flagged_terms: Vec<String>,
    pub passed: bool,
}

impl From<SafetyScore> for GatekeeperScore {
    fn from(s: SafetyScore) -> Self {
        Self {
            safety_score: s.safety_score,
            quality_score: s.quality_score,
            context_score: s.context_score,
            final_score: s.final_score,
            threshold: s.threshold,
            flagged_terms: s.flagged_terms,
            passed: s.passed,
        }
    }
}

#[derive(Serialize)]
pub struct PublishResult {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl From<PublishOutcome> for PublishResult {
    fn from(o: PublishOutcome) -> Self {
        Self {
            status: o.status.as_str().to_string(),
            message: o.message,
            platform: o.platform,
        }
    }
}

#[derive(Serialize)]
pub struct GeneratePostSuccess {
    pub status: String,
    pub transcript: String,
    pub generated_post: String,
    pub gatekeeper_score: GatekeeperScore,
    pub publish_result: PublishResult,
}

#[derive(Serialize)]
pub struct GeneratePostRejected {
    pub status: String,
    pub message: String,
    pub gatekeeper_score: GatekeeperScore,
}

struct GeneratePostForm {
    platform: String,
    audio: Bytes,
    content_type: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn generate_post_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let form = match read_form(multipart).await {
        Ok(f) => f,
        Err(response) => return response,
    };

    tracing::debug!(
        platform = %form.platform,
        content_type = %form.content_type,
        bytes = form.audio.len(),
        "Processing voice memo"
    );

    let outcome = state
        .pipeline
        .generate_post(&form.platform, &form.audio, &form.content_type)
        .await;

    match outcome {
        Ok(PipelineOutcome::Published {
            transcript,
            generated_post,
            score,
            publish_result,
        }) => {
            tracing::info!(
                post = %sanitize_prompt(&generated_post),
                published = publish_result.is_success(),
                "Post passed gatekeeper"
            );
            (
                StatusCode::OK,
                Json(GeneratePostSuccess {
                    status: "success".to_string(),
                    transcript,
                    generated_post,
                    gatekeeper_score: score.into(),
                    publish_result: publish_result.into(),
                }),
            )
                .into_response()
        }
        Ok(PipelineOutcome::Rejected { score }) => {
            let message = format!(
                "The generated post did not meet the safety and quality thresholds (Score < {}).",
                score.threshold
            );
            (
                StatusCode::OK,
                Json(GeneratePostRejected {
                    status: "rejected".to_string(),
                    message,
                    gatekeeper_score: score.into(),
                }),
            )
                .into_response()
        }
        Err(PipelineError::Transcription(TranscriptionError::EmptyAudio)) => {
            error_response(StatusCode::BAD_REQUEST, "Uploaded audio file is empty")
        }
        Err(e) => {
            tracing::error!(error = %e, "Post generation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn read_form(mut multipart: Multipart) -> Result<GeneratePostForm, Response> {
    let mut platform = None;
    let mut audio = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("platform") => {
                let value = field.text().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read platform: {}", e),
                    )
                })?;
                platform = Some(value);
            }
            Some("audio_file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_AUDIO_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read audio file: {}", e),
                    )
                })?;
                audio = Some((data, content_type));
            }
            _ => {}
        }
    }

    let platform = platform.ok_or_else(|| {
        error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Missing form field: platform",
        )
    })?;
    let (audio, content_type) = audio.ok_or_else(|| {
        error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Missing form field: audio_file",
        )
    })?;

    Ok(GeneratePostForm {
        platform,
        audio,
        content_type,
    })
}
