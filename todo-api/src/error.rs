/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; an `ApiError` converts into a JSON error
/// response with a matching status code:
///
/// ```json
/// { "error": "not_found", "message": "Todo 42 not found" }
/// ```
///
/// Storage, token, and validation errors convert into `ApiError` via `From`,
/// so handlers can use `?` throughout.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use todo_shared::auth::{jwt::JwtError, middleware::AuthError};
use todo_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - storage constraint violations
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),

    /// Service unavailable (503)
    ServiceUnavailable(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ErrorResponse {
    /// Body used for unexpected failures; never carries internal detail
    pub fn internal() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            details: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::BadRequest(msg) => error_body("bad_request", msg),
            ApiError::Unauthorized(msg) => error_body("unauthorized", msg),
            ApiError::NotFound(msg) => error_body("not_found", msg),
            ApiError::Conflict(msg) => error_body("conflict", msg),
            ApiError::ValidationError(errors) => ErrorResponse {
                error: "validation_error".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(errors),
            },
            ApiError::InternalError(msg) => {
                // Logged, never exposed to clients
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::internal()
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                error_body("service_unavailable", msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

fn error_body(code: &str, message: String) -> ErrorResponse {
    ErrorResponse {
        error: code.to_string(),
        message,
        details: None,
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ApiError::ServiceUnavailable("Database is unavailable".to_string())
            }
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }
                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(err) => err.into(),
            StoreError::ConstraintViolation { constraint } => {
                ApiError::Conflict(format!("Constraint violation: {}", constraint))
            }
        }
    }
}

/// Convert auth errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                ApiError::Unauthorized("Missing authorization header".to_string())
            }
            AuthError::InvalidFormat(msg) => ApiError::BadRequest(msg),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

/// Convert JWT errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        AuthError::from(err).into()
    }
}

/// Convert JSON body rejections
///
/// Bodies that parse but do not fit the request type are validation errors;
/// everything else (syntax, content type, size) is a bad request.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "body".to_string(),
                message: err.body_text(),
            }]),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// Convert path parameter rejections
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Convert validator output to a 422 with one detail per failed rule
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::ValidationError(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Todo 3 not found".to_string());
        assert_eq!(err.to_string(), "Not found: Todo 3 not found");
    }

    #[test]
    fn test_validation_error() {
        let errors = vec![ValidationErrorDetail {
            field: "title".to_string(),
            message: "Title is required".to_string(),
        }];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 1 errors");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Conflict(String::new()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InternalError(String::new()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(ApiError::from(sqlx::Error::RowNotFound), ApiError::NotFound(_)));
        assert!(matches!(
            ApiError::from(sqlx::Error::PoolTimedOut),
            ApiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(sqlx::Error::Protocol("boom".to_string())),
            ApiError::InternalError(_)
        ));
    }

    #[test]
    fn test_store_constraint_maps_to_conflict() {
        let err = ApiError::from(StoreError::ConstraintViolation {
            constraint: "todos_task_length".to_string(),
        });
        assert!(matches!(err, ApiError::Conflict(ref msg) if msg.contains("todos_task_length")));
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::MissingCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidFormat("x".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(ApiError::from(JwtError::Expired), ApiError::Unauthorized(_)));
    }
}
