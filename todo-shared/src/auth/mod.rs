/// Authentication utilities
///
/// # Modules
///
/// - [`jwt`]: HS256 access token verification (and minting for tests/tooling)
/// - [`middleware`]: Bearer header extraction and the per-request `AuthContext`
///
/// # Example
///
/// ```
/// use todo_shared::auth::jwt::{create_token, validate_token, Claims, DEFAULT_AUDIENCE};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-test-secret-that-is-at-least-32-bytes";
/// let token = create_token(&Claims::new("user-1"), secret)?;
/// let claims = validate_token(&token, secret, DEFAULT_AUDIENCE)?;
/// assert_eq!(claims.sub, "user-1");
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
