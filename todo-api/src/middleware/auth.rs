/// Bearer token authentication layer
///
/// Verifies the `Authorization: Bearer <token>` header against the configured
/// JWT secret and audience, then inserts an `AuthContext` into request
/// extensions for handlers to read.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::post, Router};
/// use todo_api::{app::AppState, middleware::auth::require_auth};
///
/// # fn example(state: AppState) -> Router<AppState> {
/// Router::new()
///     .route("/protected", post(|| async { "ok" }))
///     .layer(axum::middleware::from_fn_with_state(state, require_auth))
/// # }
/// ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use todo_shared::auth::middleware::authenticate;

use crate::{app::AppState, error::ApiError};

/// Rejects requests without a valid access token
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jwt = &state.config.jwt;
    let auth_context = authenticate(req.headers(), &jwt.secret, &jwt.audience).map_err(|e| {
        tracing::debug!(error = ?e, "Rejected unauthenticated request");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
