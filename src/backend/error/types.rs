/**
 * Backend Error Types
 *
 * This module defines the error taxonomy used by HTTP handlers. Every
 * handler returns `ApiError` on failure and the single `IntoResponse`
 * implementation here decides the status code and the client-visible body.
 *
 * # Error Categories
 *
 * - `Validation` - malformed request body, surfaced with the field message
 * - `Authentication` - missing/invalid/expired credential, surfaced
 *   generically so callers cannot distinguish the internal reason
 * - `Authorization` - valid identity, forbidden resource
 * - `NotFound` - record absent (also used to hide non-owned records)
 * - `Conflict` - uniqueness violation (duplicate email, duplicate save)
 * - `Database` / `Internal` - unexpected faults, detail goes to the server
 *   log only, never to the client
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::shared::ErrorBody;

pub use crate::shared::types::AUTH_REQUIRED_MESSAGE;

/// Backend error taxonomy
///
/// Each variant maps to exactly one HTTP status code and one client-visible
/// message shape, so handlers never hand-roll responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed validation
    #[error("validation failed for '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable, field-level message
        message: String,
    },

    /// Missing, invalid or expired credential
    #[error("authentication required")]
    Authentication,

    /// Login failed; unknown account and wrong password are deliberately
    /// indistinguishable
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Valid identity, forbidden resource
    #[error("not permitted")]
    Authorization,

    /// Record does not exist (or is not visible to the caller)
    #[error("not found")]
    NotFound,

    /// Uniqueness violation
    #[error("conflict: {0}")]
    Conflict(String),

    /// Database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other unexpected failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Authentication | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Authorization => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client
    ///
    /// Server faults and authentication failures are collapsed to generic
    /// text; everything else carries its specific message.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { field, message } => format!("{field}: {message}"),
            Self::Authentication => AUTH_REQUIRED_MESSAGE.to_string(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::Authorization => "Not permitted".to_string(),
            Self::NotFound => "Not found".to_string(),
            Self::Conflict(message) => message.clone(),
            Self::Database(_) | Self::Internal(_) => "Something went wrong".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(e) => tracing::error!("database error: {e:?}"),
            ApiError::Internal(msg) => tracing::error!("internal error: {msg}"),
            other => tracing::debug!("request failed: {other}"),
        }

        let body = ErrorBody {
            message: self.client_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
