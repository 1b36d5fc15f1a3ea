use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, TodoStore, TASK_LENGTH_CONSTRAINT};
use crate::models::todo::{CreateTodo, Todo, UpdateTodo, MIN_TASK_LENGTH};

/// In-process todo store
///
/// Mirrors the PostgreSQL schema: ids start at 1 and are never reused, and
/// task text shorter than [`MIN_TASK_LENGTH`] characters is rejected as a
/// constraint violation.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl MemoryTodoStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_task(task: &str) -> StoreResult<()> {
    if task.chars().count() < MIN_TASK_LENGTH {
        return Err(StoreError::ConstraintViolation {
            constraint: TASK_LENGTH_CONSTRAINT.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Todo>> {
        Ok(self.inner.read().await.todos.values().cloned().collect())
    }

    async fn create(&self, data: CreateTodo) -> StoreResult<Todo> {
        check_task(&data.task)?;

        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let todo = Todo {
            id: inner.last_id,
            task: data.task,
            is_complete: data.is_complete.unwrap_or(false),
            user_id: data.user_id,
            inserted_at: Utc::now(),
        };
        inner.todos.insert(todo.id, todo.clone());

        Ok(todo)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Todo>> {
        Ok(self.inner.read().await.todos.get(&id).cloned())
    }

    async fn update_for_user(
        &self,
        id: i64,
        user_id: &str,
        data: UpdateTodo,
    ) -> StoreResult<Option<Todo>> {
        if let Some(task) = &data.task {
            check_task(task)?;
        }

        let mut inner = self.inner.write().await;
        match inner.todos.get_mut(&id) {
            Some(todo) if todo.user_id == user_id => {
                data.apply_to(todo);
                Ok(Some(todo.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_for_user(&self, id: i64, user_id: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let owned = inner
            .todos
            .get(&id)
            .is_some_and(|todo| todo.user_id == user_id);

        if owned {
            inner.todos.remove(&id);
        }
        Ok(owned)
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.inner.read().await.todos.len() as i64)
    }
}
