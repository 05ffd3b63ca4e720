//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::queue::QueueError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Document not found (404)
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Illegal lifecycle transition (409)
    #[error("{0}")]
    InvalidTransition(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::DocumentNotFound(_) => "document_not_found",
            ApiError::InvalidTransition(_) => "invalid_transition",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        if status.is_server_error() {
            tracing::error!(error_type = error_type, status = status.as_u16(), message = %self, "API error");
        } else {
            tracing::warn!(error_type = error_type, status = status.as_u16(), message = %self, "API error");
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::NotFound(id) => ApiError::DocumentNotFound(id),
            e @ QueueError::InvalidTransition { .. } => ApiError::InvalidTransition(e.to_string()),
            QueueError::InvalidRequest(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl From<crate::model::RequestError> for ApiError {
    fn from(err: crate::model::RequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentState, RequestError};
    use crate::service::queue::{Blocker, Operation};

    #[test]
    fn test_queue_error_status_codes() {
        let not_found: ApiError = QueueError::NotFound("doc9".into()).into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let conflict: ApiError = QueueError::InvalidTransition {
            id: "doc1".into(),
            operation: Operation::Decide,
            blocker: Blocker::State(DocumentState::Rejected),
        }
        .into();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            conflict.to_string(),
            "Invalid transition for document doc1: cannot decide, document is Rejected"
        );

        let bad: ApiError = QueueError::InvalidRequest(RequestError::EmptyField("context")).into();
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
    }
}
