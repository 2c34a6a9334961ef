//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//!
//! Two body shapes are produced:
//!
//! - Invalid pnums on the derivation routes return 400 with
//!   `{"Error message": "<reason>"}`. The reason text comes verbatim from
//!   [`PnumError`] and is part of the public contract.
//! - Everything else returns `{"error": {"code", "message"}}`. Internal
//!   error details are logged and never returned to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pnr_core::{DatasetError, PnumError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body returned when a pnum fails validation on a derivation route.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvalidPnumBody {
    /// Fixed reason string.
    #[serde(rename = "Error message")]
    pub error_message: String,
}

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The path pnum failed validation (400, contract body).
    #[error(transparent)]
    InvalidPnum(#[from] PnumError),

    /// Path or query could not be extracted (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidPnum(_) => (StatusCode::BAD_REQUEST, "INVALID_PNUM"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if let Self::InvalidPnum(reason) = &self {
            let body = InvalidPnumBody {
                error_message: reason.reason(),
            };
            return (status, Json(body)).into_response();
        }

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// A registry file that cannot be read is an operator problem, not a client one.
impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        Self::Internal(err.to_string())
    }
}
