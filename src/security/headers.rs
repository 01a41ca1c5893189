//! Hop-by-hop header stripping.
//!
//! These headers are meaningful only to the client-proxy link, or would get
//! in the way of consuming the proxied response (`Accept-Encoding`). They are
//! removed unconditionally before dispatch.

use axum::http::{header, HeaderMap, HeaderName};

const PROXY_CONNECTION: HeaderName = HeaderName::from_static("proxy-connection");
const KEEP_ALIVE: HeaderName = HeaderName::from_static("keep-alive");

/// Headers removed from every forwarded request.
pub const HOP_BY_HOP_HEADERS: [HeaderName; 10] = [
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    KEEP_ALIVE,
    header::CONNECTION,
    header::ACCEPT_ENCODING,
    header::TRANSFER_ENCODING,
    PROXY_CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
];

/// Remove every hop-by-hop header, including repeated values.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP_HEADERS.iter() {
        headers.remove(name);
    }
}
