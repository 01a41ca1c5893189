//! Error taxonomy for the request pipeline.
//!
//! Every variant terminates the pipeline at the point it is raised and is
//! rendered through [`crate::http::response::error_response`].

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::response::error_response;

/// Methods accepted when the proxy runs in body-methods-only mode.
pub const BODY_METHODS: [Method; 3] = [Method::POST, Method::PUT, Method::PATCH];

/// Broad classification used for logs and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent something this proxy refuses. Never retried.
    Client,
    /// The configured target is unusable.
    Configuration,
    /// Talking to the target failed.
    Upstream,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Client => "client",
            ErrorClass::Configuration => "configuration",
            ErrorClass::Upstream => "upstream",
        }
    }
}

/// A classified pipeline failure.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("`{0}` method not allowed, this proxy server only supports `POST, PUT, PATCH` requests")]
    MethodNotAllowed(Method),

    #[error("Content-Type header must be `application/json`")]
    UnsupportedMediaType,

    #[error("invalid request body")]
    InvalidBody,

    #[error("rejected because `{phrase}` found within request body")]
    ContentRejected { phrase: String },

    #[error("unable to parse target url")]
    InvalidTarget,

    #[error("bad gateway")]
    BadGateway,

    #[error("request timed out")]
    RequestTimeout,
}

impl ProxyError {
    /// Status code reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ProxyError::InvalidBody => StatusCode::BAD_REQUEST,
            ProxyError::ContentRejected { .. } => StatusCode::UNAUTHORIZED,
            ProxyError::InvalidTarget => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::BadGateway => StatusCode::BAD_GATEWAY,
            ProxyError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ProxyError::InvalidTarget => ErrorClass::Configuration,
            ProxyError::BadGateway | ProxyError::RequestTimeout => ErrorClass::Upstream,
            _ => ErrorClass::Client,
        }
    }

    /// Short machine-friendly reason, used as a metrics label.
    pub fn reason(&self) -> &'static str {
        match self {
            ProxyError::MethodNotAllowed(_) => "method_not_allowed",
            ProxyError::UnsupportedMediaType => "unsupported_media_type",
            ProxyError::InvalidBody => "invalid_body",
            ProxyError::ContentRejected { .. } => "content_rejected",
            ProxyError::InvalidTarget => "invalid_target",
            ProxyError::BadGateway => "bad_gateway",
            ProxyError::RequestTimeout => "request_timeout",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error_response(self.status(), &self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ProxyError::MethodNotAllowed(Method::GET).status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ProxyError::UnsupportedMediaType.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(ProxyError::InvalidBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::ContentRejected { phrase: "x".into() }.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ProxyError::InvalidTarget.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ProxyError::BadGateway.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ProxyError::RequestTimeout.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn method_not_allowed_names_method() {
        let msg = ProxyError::MethodNotAllowed(Method::DELETE).to_string();
        assert_eq!(
            msg,
            "`DELETE` method not allowed, this proxy server only supports `POST, PUT, PATCH` requests"
        );
    }

    #[test]
    fn classes() {
        assert_eq!(ProxyError::InvalidBody.class(), ErrorClass::Client);
        assert_eq!(ProxyError::InvalidTarget.class(), ErrorClass::Configuration);
        assert_eq!(ProxyError::BadGateway.class(), ErrorClass::Upstream);
    }
}
