//! Per-request identifiers.
//!
//! Every successfully forwarded response carries a fresh UUID v4 in the
//! `X-Proxy-Request-ID` header. The same value tags the pipeline's log events.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

/// Response header carrying the proxy-assigned request ID.
pub const X_PROXY_REQUEST_ID: HeaderName = HeaderName::from_static("x-proxy-request-id");

/// A unique identifier assigned to one forwarded request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header value form. A hyphenated UUID is always a valid header value.
    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.0).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn request_ids_unique() {
        let ids: HashSet<RequestId> = (0..100).map(|_| RequestId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn header_value_roundtrips() {
        let id = RequestId::new();
        assert_eq!(id.header_value().to_str().unwrap(), id.as_str());
    }
}
