//! Per-request processing pipeline.
//!
//! ```text
//! Start → AdmissionCheck → ContentTypeCheck → BodyCapture → ContentFilter
//!       → DuplicateCheck (+ optional delay) → Rewrite → Forward → Respond
//! ```
//!
//! Any stage may end in `Error`, which renders the uniform JSON error body.
//! The duplicate delay is not an error; it only postpones forwarding.

use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::http::Request;
use axum::response::{IntoResponse, Response};

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::request::RequestId;
use crate::observability::metrics;
use crate::routing::RequestRewriter;
use crate::security::admission::{check_content_type, check_method};
use crate::security::ContentFilter;
use crate::throttle::{DuplicateDetector, HeaderSubset, RequestSnapshot, Verdict};
use crate::upstream::BackendForwarder;

pub struct ProxyPipeline {
    body_methods_only: bool,
    max_body_size: usize,
    filter: ContentFilter,
    detector: DuplicateDetector,
    rewriter: RequestRewriter,
    forwarder: BackendForwarder,
}

impl ProxyPipeline {
    pub fn new(config: &ProxyConfig) -> Self {
        Self::with_forwarder(
            config,
            BackendForwarder::new(Duration::from_secs(config.upstream.timeout_secs)),
        )
    }

    pub fn with_forwarder(config: &ProxyConfig, forwarder: BackendForwarder) -> Self {
        Self {
            body_methods_only: config.admission.body_methods_only,
            max_body_size: config.limits.max_body_size,
            filter: ContentFilter::from_config(&config.filter),
            detector: DuplicateDetector::new(Duration::from_secs(
                config.throttle.request_delay_secs,
            )),
            rewriter: RequestRewriter::new(config.upstream.target_url.clone()),
            forwarder,
        }
    }

    /// Run one request through every stage and produce the client response.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let method = request.method().to_string();

        let response = match self.process(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(class = e.class().as_str(), reason = e.reason(), "Pipeline stopped");
                metrics::record_rejection(e.reason());
                e.into_response()
            }
        };

        metrics::record_request(&method, response.status().as_u16(), start);
        response
    }

    async fn process(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();

        check_method(&parts.method, self.body_methods_only)?;
        check_content_type(&parts.headers)?;

        let body = self.capture_body(body).await?;
        self.filter.check(&String::from_utf8_lossy(&body))?;

        let snapshot = RequestSnapshot {
            method: parts.method.clone(),
            target_url: self.rewriter.target_url().to_string(),
            target_uri: parts.uri.to_string(),
            headers: HeaderSubset::project(&parts.headers),
            body: body.clone(),
        };
        if let Verdict::Duplicate(_) = self.detector.throttle(snapshot).await {
            metrics::record_duplicate_delay();
        }

        let upstream_request = self.rewriter.rewrite(parts, body)?;

        let request_id = RequestId::new();
        tracing::info!(
            request_id = %request_id,
            uri = %upstream_request.uri(),
            "processing"
        );

        self.forwarder.forward(upstream_request, &request_id).await
    }

    async fn capture_body(&self, body: Body) -> Result<Bytes, ProxyError> {
        match axum::body::to_bytes(body, self.max_body_size).await {
            Ok(bytes) => {
                tracing::debug!(bytes = bytes.len(), "Request body captured");
                Ok(bytes)
            }
            Err(e) => {
                tracing::debug!(error = %e, limit = self.max_body_size, "Failed to read request body");
                Err(ProxyError::InvalidBody)
            }
        }
    }
}
