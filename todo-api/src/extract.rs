/// Request extractors with JSON error bodies
///
/// Axum's stock `Json` and `Path` extractors answer rejections with plain
/// text. These wrappers route rejections through [`ApiError`] so every
/// failure uses the same `{ "error", "message" }` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
