/// Middleware for the API server
///
/// - `auth`: bearer token verification for mutating todo routes
/// - `panic`: turns handler panics into a logged, flat 500 response

pub mod auth;
pub mod panic;
