use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::CredentialsError;
use crate::presentation::state::AppState;

use super::error::{error_response, json_rejection_response};

#[derive(Deserialize)]
pub struct SaveKeysRequest {
    pub platform: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Serialize)]
pub struct SaveKeysResponse {
    pub status: String,
    pub message: String,
}

#[tracing::instrument(skip_all, fields(platform = tracing::field::Empty))]
pub async fn save_keys_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveKeysRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection),
    };
    tracing::Span::current().record("platform", request.platform.as_str());

    match state
        .credentials_service
        .save_keys(&request.platform, &request.client_id, &request.client_secret)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SaveKeysResponse {
                status: "success".to_string(),
                message: outcome.message(),
            }),
        )
            .into_response(),
        Err(e @ CredentialsError::InvalidPlatform(_)) => {
            tracing::warn!(error = %e, "Rejected credentials request");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save credentials");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save credentials: {}", e),
            )
        }
    }
}
