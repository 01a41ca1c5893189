//! Upstream dispatch.
//!
//! # Responsibilities
//! - Execute the rewritten request with a single attempt
//! - Bound the call with the configured upstream deadline
//! - Relay status and body, setting the proxy's own response headers
//!
//! # Design Decisions
//! - Transport failures become 502 without leaking the transport error text
//! - The body is streamed; copy failures after the status line are logged only
//! - Dropping the handler future (client gone) drops the upstream call too

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use axum::response::Response;
use futures_util::TryStreamExt;
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::error::ProxyError;
use crate::http::request::{RequestId, X_PROXY_REQUEST_ID};
use crate::observability::metrics;

/// Pooled client able to reach both `http` and `https` targets.
pub type HttpClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Build the pooled upstream client.
pub fn build_client() -> HttpClient {
    let https = HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new()).build(https)
}

#[derive(Clone)]
pub struct BackendForwarder {
    client: HttpClient,
    timeout: Duration,
}

impl BackendForwarder {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(build_client(), timeout)
    }

    pub fn with_client(client: HttpClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Send the request upstream and build the client response.
    pub async fn forward(
        &self,
        request: Request<Body>,
        request_id: &RequestId,
    ) -> Result<Response, ProxyError> {
        let dispatch = tokio::time::timeout(self.timeout, self.client.request(request));
        let upstream: hyper::Response<Incoming> = match dispatch.await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!(request_id = %request_id, error = %e, "Upstream error");
                metrics::record_upstream_error("transport");
                return Err(ProxyError::BadGateway);
            }
            Err(_) => {
                tracing::error!(
                    request_id = %request_id,
                    timeout_secs = self.timeout.as_secs(),
                    "Upstream request timed out"
                );
                metrics::record_upstream_error("timeout");
                return Err(ProxyError::BadGateway);
            }
        };

        let status = upstream.status();
        tracing::debug!(
            request_id = %request_id,
            status = %status,
            content_length = ?upstream.headers().get(header::CONTENT_LENGTH),
            "Upstream responded"
        );

        let id = request_id.to_string();
        let stream = Body::new(upstream.into_body())
            .into_data_stream()
            .inspect_err(move |e| {
                tracing::error!(request_id = %id, error = %e, "failed to copy upstream body to client");
            });

        let mut response = Response::new(Body::from_stream(stream));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(X_PROXY_REQUEST_ID, request_id.header_value());
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(response)
    }
}
