//! Request rewriting for the upstream target.
//!
//! # Responsibilities
//! - Point the request at the target's scheme and authority
//! - Join the target base path and the inbound path with exactly one slash
//! - Merge target and inbound query strings, target first
//! - Clear the inbound `Host` and strip hop-by-hop headers
//!
//! Paths are joined in their percent-encoded form: `url::Url::path` and
//! `http::Uri::path` both return the escaped representation, so the rule is
//! applied to what goes on the wire.

use axum::body::{Body, Bytes};
use axum::http::{header, request::Parts, Request, Uri};
use url::Url;

use crate::error::ProxyError;
use crate::security::headers::strip_hop_by_hop;

/// Join two path segments so exactly one `/` separates them.
pub fn single_joining_slash(base: &str, path: &str) -> String {
    let base_slash = base.ends_with('/');
    let path_slash = path.starts_with('/');
    match (base_slash, path_slash) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

/// Merge two raw query strings. Target first when both are present.
pub fn merge_query(target: &str, inbound: &str) -> String {
    if target.is_empty() || inbound.is_empty() {
        format!("{}{}", target, inbound)
    } else {
        format!("{}&{}", target, inbound)
    }
}

/// Rewrites inbound requests for the configured target base URL.
#[derive(Debug, Clone)]
pub struct RequestRewriter {
    target_url: String,
}

impl RequestRewriter {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Parse the target. Validated at startup, but a failure here is still
    /// reported per request as a configuration error.
    fn target(&self) -> Result<Url, ProxyError> {
        Url::parse(&self.target_url).map_err(|_| ProxyError::InvalidTarget)
    }

    /// Compute the upstream URI for an inbound request URI.
    pub fn upstream_uri(&self, inbound: &Uri) -> Result<Uri, ProxyError> {
        let target = self.target()?;
        let host = target.host_str().ok_or(ProxyError::InvalidTarget)?;

        let mut uri = match target.port() {
            Some(port) => format!("{}://{}:{}", target.scheme(), host, port),
            None => format!("{}://{}", target.scheme(), host),
        };
        uri.push_str(&single_joining_slash(target.path(), inbound.path()));

        let query = merge_query(target.query().unwrap_or(""), inbound.query().unwrap_or(""));
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query);
        }

        uri.parse().map_err(|_| ProxyError::InvalidTarget)
    }

    /// Build the upstream request from the inbound parts and captured body.
    pub fn rewrite(&self, parts: Parts, body: Bytes) -> Result<Request<Body>, ProxyError> {
        let uri = self.upstream_uri(&parts.uri)?;

        let mut headers = parts.headers;
        // The client derives Host from the new URI.
        headers.remove(header::HOST);
        strip_hop_by_hop(&mut headers);

        let mut request = Request::new(Body::from(body));
        *request.method_mut() = parts.method;
        *request.uri_mut() = uri;
        *request.headers_mut() = headers;
        Ok(request)
    }
}
