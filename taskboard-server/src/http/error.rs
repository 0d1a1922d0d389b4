//! API error types with IntoResponse
//!
//! Errors become JSON bodies of the form `{"message": "..."}` with the
//! matching status code. Database details never leave the process; they
//! are logged and replaced with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({ "message": format!("{} '{}' not found", resource, id) }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "an internal error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "list",
            id: "7".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn database_error_is_500_with_generic_body() {
        let err = ApiError::Database(DbError::Sqlx(sqlx::Error::RowNotFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["message"], "an internal error occurred");
    }

    #[tokio::test]
    async fn db_not_found_converts_to_404() {
        let err: ApiError = DbError::NotFound {
            resource: "card",
            id: "9".into(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
