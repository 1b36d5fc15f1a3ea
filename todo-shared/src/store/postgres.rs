use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::{StoreResult, TodoStore};
use crate::db::pool::health_check;
use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

/// PostgreSQL-backed todo store
///
/// Cloning is cheap; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The wrapped pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> StoreResult<Vec<Todo>> {
        let todos = Todo::list_all(&self.pool).await?;
        tracing::debug!(count = todos.len(), "Listed todos");
        Ok(todos)
    }

    #[instrument(skip(self, data), fields(user_id = %data.user_id))]
    async fn create(&self, data: CreateTodo) -> StoreResult<Todo> {
        Ok(Todo::create(&self.pool, data).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>> {
        Ok(Todo::find_by_id(&self.pool, id).await?)
    }

    #[instrument(skip(self, data))]
    async fn update_for_user(
        &self,
        id: i64,
        user_id: &str,
        data: UpdateTodo,
    ) -> StoreResult<Option<Todo>> {
        Ok(Todo::update_for_user(&self.pool, id, user_id, data).await?)
    }

    #[instrument(skip(self))]
    async fn delete_for_user(&self, id: i64, user_id: &str) -> StoreResult<bool> {
        Ok(Todo::delete_for_user(&self.pool, id, user_id).await?)
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(Todo::count(&self.pool).await?)
    }
}
