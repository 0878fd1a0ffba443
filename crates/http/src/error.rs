//! Error handling for the Shelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::send_response;
use crate::validation::FieldError;

/// Message returned alongside field errors.
pub const VALIDATION_FAILED: &str = "Validation failed!";

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<FieldError>,
        message: String,
    },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// Framework rejection that keeps its own status, e.g. 413 or 415.
    #[error("rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<FieldError>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an error answered with an explicit client status
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Rejected { status, .. } => *status,
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code used in logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Conflict { .. } => "conflict",
            AppError::NotFound { .. } => "not_found",
            AppError::BadRequest { .. } => "bad_request",
            AppError::Rejected { .. } => "rejected",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl From<Vec<FieldError>> for AppError {
    fn from(details: Vec<FieldError>) -> Self {
        Self::validation(details, VALIDATION_FAILED)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            AppError::Validation { details, message } => (message, Some(details)),
            AppError::Conflict { message }
            | AppError::NotFound { message }
            | AppError::BadRequest { message }
            | AppError::Rejected { message, .. } => (message, None),
            AppError::Internal(e) => {
                tracing::error!(
                    error_code = code,
                    status_code = status.as_u16(),
                    error = ?e,
                    "request failed"
                );
                (e.to_string(), None)
            }
        };

        if !status.is_server_error() {
            tracing::warn!(
                error_code = code,
                status_code = status.as_u16(),
                %message,
                "request rejected"
            );
        }

        // Internal details stay in the logs for release builds
        let message = if cfg!(not(debug_assertions)) && status.is_server_error() {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        send_response(status, message, details, None)
    }
}
