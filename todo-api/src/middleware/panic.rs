/// Panic handling
///
/// A panicking handler must not take the connection down with it. The
/// `CatchPanicLayer` from tower-http catches the panic, and this handler logs
/// it and answers with the same flat body used for every internal error.

use std::any::Any;

use axum::{
    http::{header, StatusCode},
    response::Response,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ErrorResponse;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response<String>;

/// Layer that converts panics into 500 responses
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn panic_message<'a>(err: &'a (dyn Any + Send + 'static)) -> &'a str {
    if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<String> {
    tracing::error!(panic = panic_message(err.as_ref()), "Handler panicked");

    let body = serde_json::to_string(&ErrorResponse::internal()).unwrap_or_default();

    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
