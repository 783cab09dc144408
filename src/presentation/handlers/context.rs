use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::error::{error_response, json_rejection_response};

#[derive(Deserialize)]
pub struct AddContextRequest {
    pub texts: Vec<String>,
}

#[derive(Serialize)]
pub struct AddContextResponse {
    pub added: usize,
    pub total: usize,
}

#[tracing::instrument(skip_all, fields(texts = tracing::field::Empty))]
pub async fn add_context_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddContextRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(rejection),
    };
    tracing::Span::current().record("texts", request.texts.len());

    let added = match state.context_index.add_texts(&request.texts).await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(error = %e, "Failed to index context");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to index context: {}", e),
            );
        }
    };

    match state.context_index.len().await {
        Ok(total) => (StatusCode::OK, Json(AddContextResponse { added, total })).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
