/// Database models
///
/// - `todo`: the todo record, its create/update inputs, and its queries
///
/// # Example
///
/// ```no_run
/// use todo_shared::models::todo::{CreateTodo, Todo};
/// use todo_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::from_url("postgresql://localhost/todo")).await?;
/// let todo = Todo::create(&pool, CreateTodo::new("Call the plumber", "user-1")).await?;
/// println!("created todo {}", todo.id);
/// # Ok(())
/// # }
/// ```

pub mod todo;
