//! Method and content-type admission.
//!
//! Runs before the body is read. No side effects beyond the decision.

use axum::http::{header, HeaderMap, Method};

use crate::error::{ProxyError, BODY_METHODS};

const JSON_CONTENT_TYPE: &[u8] = b"application/json";

/// Allow the method unless body-methods-only mode is on and the method is
/// not one of POST, PUT, PATCH.
pub fn check_method(method: &Method, body_methods_only: bool) -> Result<(), ProxyError> {
    if !body_methods_only || BODY_METHODS.contains(method) {
        return Ok(());
    }
    Err(ProxyError::MethodNotAllowed(method.clone()))
}

/// Require `Content-Type` to be exactly `application/json`.
///
/// Parameters such as `; charset=utf-8` are not tolerated.
pub fn check_content_type(headers: &HeaderMap) -> Result<(), ProxyError> {
    match headers.get(header::CONTENT_TYPE) {
        Some(value) if value.as_bytes() == JSON_CONTENT_TYPE => Ok(()),
        _ => Err(ProxyError::UnsupportedMediaType),
    }
}
