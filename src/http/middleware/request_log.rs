//! Inbound request logging.
//!
//! Logs each request line and its headers before the pipeline runs. The body
//! is not read here; the pipeline logs its size once captured.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

/// Render headers as `name: value` pairs without consuming anything.
pub fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())))
        .collect::<Vec<_>>()
        .join(", ")
}

pub async fn request_log_middleware(request: Request<Body>, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info!(
        peer = %peer,
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        headers = %format_headers(request.headers()),
        "request"
    );

    next.run(request).await
}
