/// Todo endpoints
///
/// # Endpoints
///
/// - `GET /api/todo` - List every todo (public)
/// - `POST /api/todo` - Create a todo owned by the caller
/// - `GET /api/todo/:id` - Fetch one todo (public)
/// - `PATCH /api/todo/:id` - Update the caller's todo
/// - `DELETE /api/todo/:id` - Delete the caller's todo
///
/// Mutating endpoints sit behind [`require_auth`](crate::middleware::auth::require_auth);
/// the owner of a new todo is the token's subject.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use todo_shared::{
    auth::middleware::AuthContext,
    models::todo::{CreateTodo, Todo, UpdateTodo, MIN_TASK_LENGTH},
};
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
};

// Same floor as the storage CHECK constraint
const MIN_TITLE_LENGTH: u64 = MIN_TASK_LENGTH as u64;

/// Create todo request
///
/// Clients send the task text as `title`; `task` is accepted too, matching
/// the stored field name.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTodoRequest {
    /// Task text
    #[serde(default, alias = "task")]
    #[validate(
        required(message = "Title is required"),
        length(min = MIN_TITLE_LENGTH, message = "Title is too short")
    )]
    pub title: Option<String>,

    /// Initial completion flag (default false)
    #[serde(default)]
    pub is_complete: Option<bool>,
}

/// Update todo request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    /// New task text
    #[serde(default, alias = "title")]
    #[validate(length(min = MIN_TITLE_LENGTH, message = "Task is too short"))]
    pub task: Option<String>,

    /// New completion flag
    #[serde(default)]
    pub is_complete: Option<bool>,
}

impl From<UpdateTodoRequest> for UpdateTodo {
    fn from(req: UpdateTodoRequest) -> Self {
        UpdateTodo {
            task: req.task,
            is_complete: req.is_complete,
        }
    }
}

/// List todos
///
/// ```text
/// GET /api/todo
/// ```
///
/// Responds `200 OK` with a JSON array ordered by id; `[]` when empty.
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.store.list_all().await?;
    Ok(Json(todos))
}

/// Create todo
///
/// ```text
/// POST /api/todo
/// Authorization: Bearer <access_token>
/// Content-Type: application/json
///
/// { "title": "Buy oat milk" }
/// ```
///
/// Responds `201 Created` with the stored todo, including its new id.
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid token
/// - `400 Bad Request`: body is not valid JSON
/// - `422 Unprocessable Entity`: title missing or shorter than 4 characters
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    req.validate()?;

    let task = req
        .title
        .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))?;

    let todo = state
        .store
        .create(CreateTodo {
            task,
            user_id: auth.user_id,
            is_complete: req.is_complete,
        })
        .await?;

    tracing::info!(todo_id = todo.id, user_id = %todo.user_id, "Todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Get todo
///
/// ```text
/// GET /api/todo/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no todo with this id
pub async fn get_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Todo>> {
    state
        .store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Update todo
///
/// ```text
/// PATCH /api/todo/:id
/// Authorization: Bearer <access_token>
///
/// { "is_complete": true }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: body has no updatable fields
/// - `401 Unauthorized`: missing or invalid token
/// - `404 Not Found`: no such todo, or it belongs to another user
/// - `422 Unprocessable Entity`: task shorter than 4 characters
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    req.validate()?;

    let update = UpdateTodo::from(req);
    if update.is_empty() {
        return Err(ApiError::BadRequest(
            "Provide at least one of: task, is_complete".to_string(),
        ));
    }

    let todo = state
        .store
        .update_for_user(id, &auth.user_id, update)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(todo_id = todo.id, is_complete = todo.is_complete, "Todo updated");

    Ok(Json(todo))
}

/// Delete todo
///
/// ```text
/// DELETE /api/todo/:id
/// Authorization: Bearer <access_token>
/// ```
///
/// Responds `204 No Content`.
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid token
/// - `404 Not Found`: no such todo, or it belongs to another user
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if !state.store.delete_for_user(id, &auth.user_id).await? {
        return Err(not_found(id));
    }

    tracing::info!(todo_id = id, "Todo deleted");

    Ok(StatusCode::NO_CONTENT)
}

// Other users' todos are reported as missing rather than forbidden.
fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Todo {} not found", id))
}
