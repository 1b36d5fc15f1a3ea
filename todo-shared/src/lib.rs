//! # Todo Shared Library
//!
//! Storage and authentication building blocks used by the todo API server.
//!
//! ## Module Organization
//!
//! - `models`: the todo record and its SQL queries
//! - `store`: the `TodoStore` trait with PostgreSQL and in-memory backends
//! - `db`: connection pool and embedded migrations
//! - `auth`: access token verification and the per-request auth context

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
