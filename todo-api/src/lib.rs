//! # Todo API Server Library
//!
//! HTTP API for listing, creating, updating and deleting todos.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Body and path extractors that reject with `ApiError`
//! - `middleware`: Authentication and panic handling layers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
