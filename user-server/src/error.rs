//! Error handling for the user API
//!
//! Every failure is terminal for its request and is reported as a JSON
//! `{"message": ...}` body with the matching status code.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::models::MessageResponse;
use crate::store::StoreError;

/// Message returned when the request body is absent or is not a JSON object
pub const MISSING_JSON: &str = "Missing JSON in request";

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete request body
    #[error("{0}")]
    Validation(String),

    /// Referenced user id is absent
    #[error("User with ID {0} not found")]
    NotFound(u64),

    /// Path did not match any resource
    #[error("Resource not found: {0}")]
    RouteNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(MessageResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "Rejected request body");
        ApiError::Validation(MISSING_JSON.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Unmatched user id segment");
        ApiError::RouteNotFound(rejection.body_text())
    }
}
