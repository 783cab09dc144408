use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Error body shape shared by every endpoint: `{"detail": "..."}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// Malformed or incomplete JSON bodies keep the `{"detail"}` shape.
pub fn json_rejection_response(rejection: JsonRejection) -> Response {
    tracing::warn!(error = %rejection, "Rejected JSON body");
    error_response(rejection.status(), rejection.body_text())
}
