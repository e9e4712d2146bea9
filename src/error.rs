/// Unified error types for the WeColor backend
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation errors (bad color format, missing fields)
    #[error("{0}")]
    Validation(String),

    /// Conflict errors (e.g., duplicate daily selection)
    #[error("{0}")]
    Conflict(String),

    /// Business-rule rejections from the snapshot pipeline
    /// (no selections, no contributors, already recorded).
    /// These are expected steady states, surfaced verbatim.
    #[error("{0}")]
    Rejected(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Ledger errors (RPC failure, bad gateway response)
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert ApiError to HTTP response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::Rejected(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Ledger(e) => {
                tracing::error!("Ledger failure: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Ledger unavailable, safe to retry later".to_string(),
                )
            }
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                tracing::error!("Internal failure: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(), // Don't leak details
                )
            }
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}

/// Result type alias for backend operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn response_parts(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_client_errors_surface_their_message() {
        let (status, body) =
            response_parts(ApiError::Validation("Invalid hex color format".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid hex color format");

        let (status, body) = response_parts(ApiError::Conflict(
            "You have already selected a color for today".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "You have already selected a color for today");

        let (status, body) = response_parts(ApiError::Rejected(
            "No color selections for this date".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "No color selections for this date");

        let (status, _) = response_parts(ApiError::NotFound("selection".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_errors_are_redacted() {
        let (status, body) =
            response_parts(ApiError::Internal("pool exhausted".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");

        let (status, body) =
            response_parts(ApiError::Ledger("connection refused".to_string())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error, "Ledger unavailable, safe to retry later");
        assert!(!body.error.contains("connection refused"));
    }
}
