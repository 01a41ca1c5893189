//! Structured error responses.
//!
//! # Responsibilities
//! - Render `{"code": "<status>", "msg": "<text>"}` for every failure
//! - Set `Content-Type: application/json` and an exact `Content-Length`
//! - Guarantee a parseable body even if serialization fails

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;

/// Wire shape of every error produced by the proxy.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub msg: String,
}

/// Build a JSON error response for the given status and message.
pub fn error_response(status: StatusCode, msg: &str) -> Response {
    let code = status.as_u16().to_string();
    let body = ErrorBody {
        code: code.clone(),
        msg: msg.to_string(),
    };

    tracing::info!(code = %body.code, msg = %body.msg, "response");

    let buf = serde_json::to_vec(&body).unwrap_or_else(|_| fallback_body(&code));
    let len = buf.len();

    let mut response = Response::new(Body::from(buf));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    response
}

fn fallback_body(code: &str) -> Vec<u8> {
    format!(
        "{{\"code\": \"{}\", \"msg\": \"There was a response that could not be serialized into JSON\"}}",
        code
    )
    .into_bytes()
}
