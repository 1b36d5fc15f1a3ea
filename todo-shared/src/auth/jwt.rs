/// JWT access token verification
///
/// Tokens are issued by the identity provider and signed with HS256 using the
/// project's shared JWT secret. This API never issues tokens for end users; it
/// only verifies them. `create_token` exists so tests and local tooling can
/// mint tokens with the same shape the provider produces.
///
/// # Verified Claims
///
/// - Signature (HS256)
/// - `exp`: token must not be expired
/// - `aud`: must match the configured audience (default `authenticated`)
///
/// # Example
///
/// ```
/// use todo_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-test-secret-that-is-at-least-32-bytes";
/// let claims = Claims::new("9f1c6a52-5b7e-4c6e-bb1d-7b0a4d2f9e11");
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret, "authenticated")?;
/// assert_eq!(validated.sub, claims.sub);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Audience claim carried by tokens of signed-in users
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Audience claim did not match
    #[error("Invalid audience: expected {expected}")]
    InvalidAudience { expected: String },

    /// Subject claim is empty
    #[error("Token has no subject")]
    MissingSubject,
}

/// Access token claims
///
/// Only the claims the API relies on are modelled; unknown claims in the
/// token are ignored during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user id that owns created todos
    pub sub: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// User email, when the provider includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Provider role (e.g. "authenticated")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Creates claims for a signed-in user with a one hour lifetime
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_expiration(user_id, Duration::hours(1))
    }

    /// Creates claims with a custom lifetime
    ///
    /// A negative duration produces an already-expired token, which is handy
    /// for exercising expiry handling.
    pub fn with_expiration(user_id: impl Into<String>, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.into(),
            aud: DEFAULT_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            email: None,
            role: Some(DEFAULT_AUDIENCE.to_string()),
        }
    }

    /// Sets the email claim
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into an HS256 token
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// # Errors
///
/// Returns an error if:
/// - Signature is invalid
/// - Token has expired
/// - Audience doesn't match `audience`
/// - Subject is empty
pub fn validate_token(token: &str, secret: &str, audience: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidAudience => JwtError::InvalidAudience {
            expected: audience.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(JwtError::MissingSubject);
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::new("user-123").with_email("user@example.com");
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET, DEFAULT_AUDIENCE).unwrap();
        assert_eq!(validated.sub, "user-123");
        assert_eq!(validated.email.as_deref(), Some("user@example.com"));
        assert_eq!(validated.role.as_deref(), Some("authenticated"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&Claims::new("user-123"), SECRET).unwrap();

        let result = validate_token(&token, "another-secret-key-at-least-32-bytes", DEFAULT_AUDIENCE);
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::with_expiration("user-123", Duration::minutes(-5));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        let result = validate_token(&token, SECRET, DEFAULT_AUDIENCE);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let token = create_token(&Claims::new("user-123"), SECRET).unwrap();

        let result = validate_token(&token, SECRET, "service_role");
        assert!(matches!(result, Err(JwtError::InvalidAudience { .. })));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let token = create_token(&Claims::new(""), SECRET).unwrap();

        let result = validate_token(&token, SECRET, DEFAULT_AUDIENCE);
        assert!(matches!(result, Err(JwtError::MissingSubject)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = validate_token("not.a.jwt", SECRET, DEFAULT_AUDIENCE);
        assert!(result.is_err());
    }
}
