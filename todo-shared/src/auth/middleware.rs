/// Request authentication primitives for Axum
///
/// `authenticate` pulls the bearer token out of the request headers, verifies
/// it, and produces an `AuthContext`. The API crate wraps it in a middleware
/// layer that inserts the context into request extensions, where handlers
/// read it with Axum's `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use todo_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::jwt::{validate_token, Claims, JwtError};

/// Authenticated caller, added to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (token subject)
    pub user_id: String,

    /// User email, if present in the token
    pub email: Option<String>,

    /// Provider role, if present in the token
    pub role: Option<String>,
}

impl AuthContext {
    /// Creates auth context from verified JWT claims
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Error type for request authentication
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidAudience { .. } => {
                AuthError::InvalidToken("Invalid token audience".to_string())
            }
            _ => AuthError::InvalidToken(format!("Invalid token: {}", err)),
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidFormat("Empty Bearer token".to_string()));
    }

    Ok(token)
}

/// Verifies the request's bearer token and builds the caller's context
///
/// # Errors
///
/// - `MissingCredentials` if there is no Authorization header
/// - `InvalidFormat` if the header is not a Bearer token
/// - `InvalidToken` if the token fails verification
pub fn authenticate(
    headers: &HeaderMap,
    secret: &str,
    audience: &str,
) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;
    let claims = validate_token(token, secret, audience)?;
    Ok(AuthContext::from_claims(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, DEFAULT_AUDIENCE};
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_authenticate_valid_token() {
        let token = create_token(&Claims::new("user-1").with_email("a@b.c"), SECRET).unwrap();
        let headers = headers_with(&format!("Bearer {}", token));

        let context = authenticate(&headers, SECRET, DEFAULT_AUDIENCE).unwrap();
        assert_eq!(context.user_id, "user-1");
        assert_eq!(context.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_missing_header() {
        let result = authenticate(&HeaderMap::new(), SECRET, DEFAULT_AUDIENCE);
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[test]
    fn test_non_bearer_scheme() {
        let result = authenticate(&headers_with("Basic dXNlcjpwYXNz"), SECRET, DEFAULT_AUDIENCE);
        assert!(matches!(result, Err(AuthError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_bearer_token() {
        let headers = headers_with("Bearer ");
        let result = bearer_token(&headers);
        assert!(matches!(result, Err(AuthError::InvalidFormat(_))));
    }

    #[test]
    fn test_invalid_token() {
        let result = authenticate(&headers_with("Bearer nope"), SECRET, DEFAULT_AUDIENCE);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidFormat("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AuthError::InvalidToken("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
