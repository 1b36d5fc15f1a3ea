/// Todo model and its queries
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
///     user_id TEXT NOT NULL,
///     task TEXT NOT NULL CONSTRAINT todos_task_length CHECK (char_length(task) > 3),
///     is_complete BOOLEAN NOT NULL DEFAULT FALSE,
///     inserted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `user_id` is the identity provider's user id. It is not a foreign key;
/// ownership is enforced by the `*_for_user` queries.
///
/// # Example
///
/// ```no_run
/// use todo_shared::models::todo::{CreateTodo, Todo};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let todo = Todo::create(&pool, CreateTodo::new("Buy oat milk", "user-1")).await?;
/// assert!(!todo.is_complete);
///
/// let all = Todo::list_all(&pool).await?;
/// assert!(all.iter().any(|t| t.id == todo.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Shortest task text the schema accepts
pub const MIN_TASK_LENGTH: usize = 4;

/// A stored todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Storage-assigned id, never reused
    pub id: i64,

    /// Task text
    pub task: String,

    /// Completion flag
    pub is_complete: bool,

    /// Owner
    pub user_id: String,

    /// When the todo was created
    pub inserted_at: DateTime<Utc>,
}

/// Input for creating a todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodo {
    /// Task text
    pub task: String,

    /// Owner
    pub user_id: String,

    /// Initial completion flag; storage default (false) when `None`
    #[serde(default)]
    pub is_complete: Option<bool>,
}

impl CreateTodo {
    /// Todo with storage defaults for everything but task and owner
    pub fn new(task: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            user_id: user_id.into(),
            is_complete: None,
        }
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodo {
    /// New task text
    pub task: Option<String>,

    /// New completion flag
    pub is_complete: Option<bool>,
}

impl UpdateTodo {
    /// True when the update would change nothing
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.is_complete.is_none()
    }

    /// Applies the present fields to `todo`
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(task) = &self.task {
            todo.task = task.clone();
        }
        if let Some(is_complete) = self.is_complete {
            todo.is_complete = is_complete;
        }
    }
}

impl Todo {
    /// Lists every todo, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, task, is_complete, user_id, inserted_at
            FROM todos
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Inserts a todo and returns it with its assigned id
    ///
    /// # Errors
    ///
    /// Storage errors propagate unchanged, including the `todos_task_length`
    /// check violation for task text shorter than [`MIN_TASK_LENGTH`].
    pub async fn create(pool: &PgPool, data: CreateTodo) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (task, user_id, is_complete)
            VALUES ($1, $2, COALESCE($3, FALSE))
            RETURNING id, task, is_complete, user_id, inserted_at
            "#,
        )
        .bind(data.task)
        .bind(data.user_id)
        .bind(data.is_complete)
        .fetch_one(pool)
        .await
    }

    /// Finds a todo by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, task, is_complete, user_id, inserted_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Updates a todo owned by `user_id`
    ///
    /// Returns `None` when the todo does not exist or belongs to someone else.
    pub async fn update_for_user(
        pool: &PgPool,
        id: i64,
        user_id: &str,
        data: UpdateTodo,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET task = COALESCE($3, task),
                is_complete = COALESCE($4, is_complete)
            WHERE id = $1 AND user_id = $2
            RETURNING id, task, is_complete, user_id, inserted_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.task)
        .bind(data.is_complete)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a todo owned by `user_id`, returning whether a row was removed
    pub async fn delete_for_user(pool: &PgPool, id: i64, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts stored todos
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo {
            id: 7,
            task: "Water the plants".to_string(),
            is_complete: false,
            user_id: "user-1".to_string(),
            inserted_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_todo_defaults() {
        let data = CreateTodo::new("Buy oat milk", "user-1");
        assert_eq!(data.task, "Buy oat milk");
        assert_eq!(data.user_id, "user-1");
        assert_eq!(data.is_complete, None);
    }

    #[test]
    fn test_update_todo_is_empty() {
        assert!(UpdateTodo::default().is_empty());
        assert!(!UpdateTodo {
            is_complete: Some(true),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_update_todo_apply_only_present_fields() {
        let mut todo = sample();

        UpdateTodo {
            task: None,
            is_complete: Some(true),
        }
        .apply_to(&mut todo);
        assert_eq!(todo.task, "Water the plants");
        assert!(todo.is_complete);

        UpdateTodo {
            task: Some("Water the cactus".to_string()),
            is_complete: None,
        }
        .apply_to(&mut todo);
        assert_eq!(todo.task, "Water the cactus");
        assert!(todo.is_complete);
        assert_eq!(todo.id, 7);
    }

    #[test]
    fn test_todo_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["task"], "Water the plants");
        assert_eq!(json["is_complete"], false);
        assert_eq!(json["user_id"], "user-1");
        assert!(json["inserted_at"].is_string());
    }
}
