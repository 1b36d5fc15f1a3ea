/// Todo storage seam
///
/// Route handlers talk to a [`TodoStore`] trait object rather than to a pool
/// directly. Two implementations exist:
///
/// - [`PgTodoStore`]: PostgreSQL, delegating to the queries on
///   [`Todo`](crate::models::todo::Todo)
/// - [`MemoryTodoStore`]: in-process, for tests and database-less local runs
///
/// Both assign ids monotonically, default `is_complete` to false, and scope
/// updates and deletes to the owning user.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use todo_shared::models::todo::CreateTodo;
/// use todo_shared::store::{MemoryTodoStore, TodoStore};
///
/// # async fn example() -> Result<(), todo_shared::store::StoreError> {
/// let store: Arc<dyn TodoStore> = Arc::new(MemoryTodoStore::new());
/// let todo = store.create(CreateTodo::new("Renew passport", "user-1")).await?;
/// assert_eq!(store.list_all().await?, vec![todo]);
/// # Ok(())
/// # }
/// ```

mod memory;
mod postgres;

pub use memory::MemoryTodoStore;
pub use postgres::PgTodoStore;

use async_trait::async_trait;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

/// Check constraint guarding the minimum task length
pub const TASK_LENGTH_CONSTRAINT: &str = "todos_task_length";

/// Store error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error reported by the database driver
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A storage constraint rejected the write
    #[error("Constraint violation: {constraint}")]
    ConstraintViolation { constraint: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let constraint = err
            .as_database_error()
            .and_then(|db_err| db_err.constraint())
            .map(String::from);

        match constraint {
            Some(constraint) => StoreError::ConstraintViolation { constraint },
            None => StoreError::Database(err),
        }
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Todo persistence operations
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Every todo, ordered by id
    async fn list_all(&self) -> StoreResult<Vec<Todo>>;

    /// Inserts a todo and returns it with its assigned id
    async fn create(&self, data: CreateTodo) -> StoreResult<Todo>;

    /// Looks up a single todo
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>>;

    /// Applies a partial update to a todo owned by `user_id`
    async fn update_for_user(
        &self,
        id: i64,
        user_id: &str,
        data: UpdateTodo,
    ) -> StoreResult<Option<Todo>>;

    /// Deletes a todo owned by `user_id`
    async fn delete_for_user(&self, id: i64, user_id: &str) -> StoreResult<bool>;

    /// Number of stored todos
    async fn count(&self) -> StoreResult<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_errors_without_constraint_stay_database_errors() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));

        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn test_constraint_violation_display() {
        let err = StoreError::ConstraintViolation {
            constraint: TASK_LENGTH_CONSTRAINT.to_string(),
        };
        assert_eq!(err.to_string(), "Constraint violation: todos_task_length");
    }
}
