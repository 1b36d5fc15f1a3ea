/// API route handlers
///
/// - `health`: service and storage health
/// - `todos`: todo list/create/get/update/delete

pub mod health;
pub mod todos;
