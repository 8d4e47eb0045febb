//! Translation of `AppError` into HTTP responses.
//!
//! Status mapping:
//! - NotFound   → 404, empty body
//! - Duplicate  → 409 + ErrorResponse
//! - Validation → 400 + ErrorResponse listing each violation
//! - BadRequest → 400 + ErrorResponse
//! - Configuration / Internal → 500, sanitized ErrorResponse

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Not-found carries no payload
            AppError::NotFound {
                entity,
                field,
                value,
            } => {
                tracing::debug!(%entity, %field, %value, "resource not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                let payload = ErrorResponse::new(&format!(
                    "{entity} with {field} '{value}' already exists"
                ));
                (StatusCode::CONFLICT, Json(payload)).into_response()
            }
            AppError::Validation { errors } => {
                let messages = errors
                    .into_iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                let payload = ErrorResponse::new("Validation failed").with_messages(messages);
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
            AppError::BadRequest { message } => {
                let payload = ErrorResponse::new(&message);
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = %source, "configuration error");
                internal_error_response()
            }
            AppError::Internal { source } => {
                tracing::error!(error = %source, "internal error");
                internal_error_response()
            }
        }
    }
}

/// Sanitized 500 response; the source error stays in the logs.
fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("An internal error occurred")),
    )
        .into_response()
}

/// Maps an `AppError` variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;
    use http_body_util::BodyExt;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            error_to_status_code(&AppError::not_found("user", "id", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status_code(&AppError::validation("id", "must be positive")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&AppError::BadRequest {
                message: "bad".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&AppError::Duplicate {
                entity: "user".to_string(),
                field: "email".to_string(),
                value: "a@b.c".to_string()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_to_status_code(&AppError::Internal {
                source: anyhow::anyhow!("boom")
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn not_found_response_has_empty_body() {
        let response = AppError::not_found("user", "id", 42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn validation_response_lists_each_violation() {
        let error = AppError::Validation {
            errors: vec![
                ValidationFieldError {
                    field: "email".to_string(),
                    message: "Invalid email format".to_string(),
                },
                ValidationFieldError {
                    field: "name".to_string(),
                    message: "too short".to_string(),
                },
            ],
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.message, "Validation failed");
        assert_eq!(payload.messages.len(), 2);
        assert_eq!(payload.messages[0], "email: Invalid email format");
    }

    #[tokio::test]
    async fn internal_response_is_sanitized() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("connection string postgres://secret"),
        };
        let response = error.into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(!payload.message.contains("secret"));
    }
}
