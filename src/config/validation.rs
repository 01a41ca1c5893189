//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Target URL must be absolute with an http(s) scheme and a host
//! - Value ranges and cross-field constraints
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

use crate::config::schema::ProxyConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid target url `{url}`: {reason}")]
    TargetUrl { url: String, reason: String },

    #[error("upstream.timeout_secs must be greater than 0")]
    UpstreamTimeout,

    #[error(
        "timeouts.request_secs ({request_secs}) must exceed throttle.request_delay_secs ({delay_secs}) \
         plus upstream.timeout_secs ({upstream_secs})"
    )]
    RequestTimeoutTooShort {
        request_secs: u64,
        delay_secs: u64,
        upstream_secs: u64,
    },

    #[error("limits.max_body_size must be greater than 0")]
    MaxBodySize,

    #[error("invalid log level `{0}`")]
    LogLevel(String),

    #[error("invalid metrics address `{0}`")]
    MetricsAddress(String),
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = validate_target_url(&config.upstream.target_url) {
        errors.push(ValidationError::TargetUrl {
            url: config.upstream.target_url.clone(),
            reason,
        });
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::UpstreamTimeout);
    }

    // A duplicate waits out the delay before its upstream deadline starts.
    let worst_case = config
        .throttle
        .request_delay_secs
        .saturating_add(config.upstream.timeout_secs);
    if config.timeouts.request_secs <= worst_case {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: config.timeouts.request_secs,
            delay_secs: config.throttle.request_delay_secs,
            upstream_secs: config.upstream.timeout_secs,
        });
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::MaxBodySize);
    }

    if tracing::Level::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_target_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
