//! Comparable request snapshots.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName, Method};

/// Values of one header in received order.
pub type HeaderValues = Vec<Vec<u8>>;

/// A fixed subset of request headers used for duplicate comparison.
///
/// Any header outside these fields is ignored. Value order within a field
/// matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSubset {
    pub host: HeaderValues,
    pub accept: HeaderValues,
    pub user_agent: HeaderValues,
    pub connection: HeaderValues,
    pub content_type: HeaderValues,
    pub content_length: HeaderValues,
    pub accept_encoding: HeaderValues,
}

impl HeaderSubset {
    /// Project the allow-listed headers out of a header map.
    pub fn project(headers: &HeaderMap) -> Self {
        let values = |name: HeaderName| -> HeaderValues {
            headers
                .get_all(name)
                .iter()
                .map(|v| v.as_bytes().to_vec())
                .collect()
        };

        Self {
            host: values(header::HOST),
            accept: values(header::ACCEPT),
            user_agent: values(header::USER_AGENT),
            connection: values(header::CONNECTION),
            content_type: values(header::CONTENT_TYPE),
            content_length: values(header::CONTENT_LENGTH),
            accept_encoding: values(header::ACCEPT_ENCODING),
        }
    }
}

/// Everything that makes two requests "the same" for throttling purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub method: Method,
    pub target_url: String,
    pub target_uri: String,
    pub headers: HeaderSubset,
    pub body: Bytes,
}
