use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone()),
            ApiError::Domain(err) => match err {
                DomainError::InvalidInput(detail) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", detail.clone())
                }
                DomainError::Extraction(detail) => {
                    (StatusCode::BAD_REQUEST, "EXTRACTION_FAILED", detail.clone())
                }
                DomainError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
                DomainError::Transport(detail) => {
                    tracing::warn!(detail, "Completion service unreachable");
                    (
                        StatusCode::BAD_GATEWAY,
                        "TRANSPORT_ERROR",
                        "The AI service could not be reached. Please try again later.".to_string(),
                    )
                }
                DomainError::Provider { status, message } => {
                    tracing::warn!(status, message, "Completion service returned an error");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PROVIDER_ERROR",
                        format!("The AI service returned an error (status {status})"),
                    )
                }
                DomainError::MalformedResponse(detail) => {
                    tracing::warn!(detail, "Completion service returned an unusable response");
                    (
                        StatusCode::BAD_GATEWAY,
                        "MALFORMED_RESPONSE",
                        "The AI service returned an empty or unreadable response".to_string(),
                    )
                }
                DomainError::IoError(_) | DomainError::Internal(_) => {
                    tracing::error!(error = %err, "API internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL",
                        "An internal error occurred".to_string(),
                    )
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}
