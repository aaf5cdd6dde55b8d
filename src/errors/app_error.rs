use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use super::prosody_error::ProsodyError;
use crate::core::synthesis::SynthesisError;

/// Result type for HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Errors returned from the HTTP API
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Prosody(#[from] ProsodyError),
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Configuration problems are the caller's fault (400), blank text is a
    /// blocking warning (422) and backend failures are upstream errors (502,
    /// or 504 for timeouts).
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Prosody(ProsodyError::Configuration(_)) => StatusCode::BAD_REQUEST,
            AppError::Prosody(ProsodyError::EmptyInput) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Prosody(ProsodyError::Synthesis(SynthesisError::Timeout(_))) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            AppError::Prosody(ProsodyError::Synthesis(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
