/// Common test utilities for API tests
///
/// The router is driven in-process with `tower::ServiceExt::oneshot`
/// against an in-memory todo store, so these tests need no database.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use todo_api::app::{build_router, AppState};
use todo_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, LogFormat, StorageBackend};
use todo_shared::auth::jwt::{create_token, Claims, DEFAULT_AUDIENCE};
use todo_shared::store::{MemoryTodoStore, TodoStore};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        storage: StorageBackend::Memory,
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            run_migrations: false,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        },
        log_format: LogFormat::Pretty,
    }
}

/// Test context: app, its store, and a signed-in user
pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryTodoStore>,
    pub user_id: String,
    pub token: String,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryTodoStore::new());
        let state = AppState::new(store.clone() as Arc<dyn TodoStore>, test_config());
        let user_id = uuid::Uuid::new_v4().to_string();
        let token = token_for(&user_id);

        Self {
            app: build_router(state),
            store,
            user_id,
            token,
        }
    }

    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Sends a request and returns status plus parsed JSON body (`Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    /// Posts a new todo as the context user without checking the outcome
    pub async fn create_raw(&self, title: String) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/todo",
            Some(&self.token),
            Some(serde_json::json!({ "title": title })),
        )
        .await
    }

    /// Creates a todo through the API as the context user
    pub async fn create(&self, title: &str) -> Value {
        let (status, body) = self.create_raw(title.to_string()).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body
    }
}

/// Signs a valid access token for `user_id`
pub fn token_for(user_id: &str) -> String {
    create_token(&Claims::new(user_id), TEST_JWT_SECRET).unwrap()
}
