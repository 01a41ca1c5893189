//! Overall per-request deadline.
//!
//! Expiry is rendered as a JSON error like every other pipeline failure.
//! Validation keeps this deadline above the duplicate delay plus the upstream
//! timeout, so an unresponsive backend still surfaces as a 502.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ProxyError;

pub async fn request_timeout_middleware(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                method = %method,
                uri = %uri,
                timeout_secs = limit.as_secs(),
                "Request deadline exceeded"
            );
            ProxyError::RequestTimeout.into_response()
        }
    }
}
