//! HTTP error handling and response conversion.
//!
//! Errors are mapped to status codes and a JSON body of the shape
//! `{"error": message}`, with an `errors` map added when field-level
//! messages exist.

use crate::application::validation::{model_errors::ModelErrors, validator::ValidationFailure};
use crate::domain::city::errors::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

pub const INTERNAL_ERROR_MESSAGE: &str = "A problem happened while handling your request.";

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// Missing or unusable request body (400).
    BadRequest(String),

    /// Request data broke one or more field rules (400).
    ValidationError(ModelErrors),

    /// Store failure or failed save (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::ValidationError(errors) => write!(
                f,
                "Validation error: {}",
                errors.fields().collect::<Vec<_>>().join(", ")
            ),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Resource not found".into(),
            Self::BadRequest(msg) => msg.clone(),
            Self::ValidationError(_) => "One or more validation errors occurred".into(),
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        if status.is_server_error() {
            tracing::error!("error={}", self);
        } else {
            tracing::warn!("error={}", self);
        }

        let body = match self {
            Self::ValidationError(errors) => json!({ "error": message, "errors": errors }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

// === Validation Failure Conversion ===

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::BadRequest(None) => {
                AppError::BadRequest("A request body is required".into())
            }
            ValidationFailure::BadRequest(Some(errors)) => AppError::ValidationError(errors),
            ValidationFailure::NotFound(what) => AppError::NotFound(what),
            ValidationFailure::Internal(msg) => AppError::Internal(msg),
        }
    }
}

// === Domain Error Conversion ===

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Conflict(msg) => AppError::Internal(msg),
            DomainError::InfrastructureError(msg) => {
                tracing::error!(infrastructure_error = %msg);
                AppError::Internal(msg)
            }
        }
    }
}
