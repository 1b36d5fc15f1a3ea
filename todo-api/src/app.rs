/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use todo_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::with_pool(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware,
    routes::{self, todos},
};
use axum::{
    handler::Handler,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::{sync::Arc, time::Duration};
use todo_shared::store::{PgTodoStore, TodoStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler by Axum's `State` extractor; both fields are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Todo storage
    pub store: Arc<dyn TodoStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state around any store implementation
    pub fn new(store: Arc<dyn TodoStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Creates state backed by PostgreSQL
    pub fn with_pool(pool: PgPool, config: Config) -> Self {
        Self::new(Arc::new(PgTodoStore::new(pool)), config)
    }
}

/// Builds the Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health
/// └── /api/todo
///     ├── GET    /        list (public)
///     ├── POST   /        create (auth)
///     ├── GET    /:id     get (public)
///     ├── PATCH  /:id     update (auth)
///     └── DELETE /:id     delete (auth)
/// ```
///
/// Mutating todo handlers are individually wrapped in the auth layer.
/// Router layers, outermost first: CORS, request tracing, panic catching.
pub fn build_router(state: AppState) -> Router {
    let auth = axum::middleware::from_fn_with_state(state.clone(), middleware::auth::require_auth);

    let todo_routes = Router::new()
        .route(
            "/",
            get(todos::list_todos).post(todos::create_todo.layer(auth.clone())),
        )
        .route(
            "/:id",
            get(todos::get_todo)
                .patch(todos::update_todo.layer(auth.clone()))
                .delete(todos::delete_todo.layer(auth)),
        );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/todo", todo_routes)
        .layer(middleware::panic::catch_panic_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
