use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps domain failures to HTTP status codes and renders them as JSON
/// `ErrorResponse` bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Invalid UUID format in path or query parameter
    InvalidUuid(String),
    /// Product id not in the catalog
    ProductNotFound(Uuid),
    /// Category id not in the catalog
    CategoryNotFound(Uuid),
    /// Request body broke one or more validation rules
    Validation(Vec<String>),
    /// Resource already exists
    Conflict(String),
    /// Store operation error
    StoreError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            ApiError::InvalidUuid(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid UUID format: expected format like '550e8400-e29b-41d4-a716-446655440000', got '{}'", id),
                Vec::new(),
            ),
            ApiError::ProductNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Product not found: {}", id),
                Vec::new(),
            ),
            ApiError::CategoryNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Category not found: {}", id),
                Vec::new(),
            ),
            ApiError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                details,
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                format!("Conflict: {}", msg),
                Vec::new(),
            ),
            ApiError::StoreError(err) => {
                tracing::error!("Store error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Store error: {}", err),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<uuid::Error> for ApiError {
    fn from(err: uuid::Error) -> Self {
        ApiError::InvalidUuid(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::StoreError(err)
    }
}

/// Parses a path or query id, keeping the raw text for the error message.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidUuid(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_lists_details() {
        let (status, body) = render(ApiError::Validation(vec![
            "name must not be empty".to_string(),
            "price must be >= 0".to_string(),
        ]))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_not_found_omits_details() {
        let id = Uuid::new_v4();
        let (status, body) = render(ApiError::ProductNotFound(id)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains(&id.to_string()));
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(matches!(parse_id("nope"), Err(ApiError::InvalidUuid(raw)) if raw == "nope"));
        assert!(parse_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }
}
