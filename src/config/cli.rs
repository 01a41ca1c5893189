//! Command line and environment configuration.
//!
//! A `--config` file wins entirely. Otherwise the configuration is assembled
//! from flags, each falling back to its environment variable and then to the
//! schema default.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{MatchMode, ProxyConfig};
use crate::config::validation::validate_config;

#[derive(Debug, Clone, Parser)]
#[command(name = "proxy-service")]
#[command(about = "Forwarding HTTP proxy with content filtering and duplicate throttling", long_about = None)]
pub struct Cli {
    /// TOML configuration file. When set, all other flags are ignored.
    #[arg(short, long, env = "PROXY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Development logging (readable, debug level).
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// Proxy server host name.
    #[arg(long, env = "HOST", default_value = "")]
    pub host: String,

    /// Proxy server port number.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// URL of the target backend service.
    #[arg(long, env = "TARGET_URL", default_value = "")]
    pub target_url: String,

    /// Seconds to delay consecutive identical requests.
    #[arg(long, env = "REQUEST_DELAY", default_value_t = 2)]
    pub request_delay: u64,

    /// Only accept POST, PUT and PATCH.
    #[arg(long, env = "BODY_METHODS_ONLY")]
    pub body_methods_only: bool,

    /// Reject requests whose body contains this word or phrase.
    #[arg(long, env = "REJECT_WITH", default_value = "")]
    pub reject_with: String,

    /// How `--reject-with` is matched.
    #[arg(long, env = "MATCH_MODE", value_enum, default_value_t = MatchMode::Exact)]
    pub match_mode: MatchMode,

    /// Case-insensitive rejection matching.
    #[arg(long, env = "REJECT_INSENSITIVE")]
    pub reject_insensitive: bool,

    /// Maximum request body size in bytes.
    #[arg(long, env = "MAX_BODY_SIZE")]
    pub max_body_size: Option<usize>,

    /// Serve Prometheus metrics on this address.
    #[arg(long, env = "METRICS_ADDRESS")]
    pub metrics_address: Option<String>,
}

impl Cli {
    /// Resolve the final, validated configuration.
    pub fn into_config(self) -> Result<ProxyConfig, ConfigError> {
        if let Some(path) = &self.config {
            return load_config(path);
        }

        let config = self.to_config();
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn to_config(&self) -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.listener.host = self.host.clone();
        config.listener.port = self.port;
        config.upstream.target_url = self.target_url.clone();
        config.throttle.request_delay_secs = self.request_delay;
        config.admission.body_methods_only = self.body_methods_only;
        config.filter.reject_with = self.reject_with.clone();
        config.filter.match_mode = self.match_mode;
        config.filter.case_insensitive = self.reject_insensitive;
        config.observability.debug = self.debug;
        if let Some(size) = self.max_body_size {
            config.limits.max_body_size = size;
        }
        if let Some(addr) = &self.metrics_address {
            config.observability.metrics_enabled = true;
            config.observability.metrics_address = addr.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_schema() {
        let cli = Cli::try_parse_from([
            "proxy-service",
            "--target-url",
            "http://localhost:3000",
            "--port",
            "9000",
            "--request-delay",
            "5",
            "--body-methods-only",
            "--reject-with",
            "bad_message",
            "--match-mode",
            "contains",
            "--reject-insensitive",
        ])
        .unwrap();

        let config = cli.into_config().unwrap();
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.upstream.target_url, "http://localhost:3000");
        assert_eq!(config.throttle.request_delay_secs, 5);
        assert!(config.admission.body_methods_only);
        assert_eq!(config.filter.reject_with, "bad_message");
        assert_eq!(config.filter.match_mode, MatchMode::Contains);
        assert!(config.filter.case_insensitive);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn invalid_target_from_flags_fails() {
        let cli = Cli::try_parse_from(["proxy-service", "--target-url", "not-a-url"]).unwrap();
        assert!(matches!(cli.into_config(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn metrics_address_enables_metrics() {
        let cli = Cli::try_parse_from([
            "proxy-service",
            "--target-url",
            "http://localhost:3000",
            "--metrics-address",
            "127.0.0.1:9100",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert!(config.observability.metrics_enabled);
        assert_eq!(config.observability.metrics_address, "127.0.0.1:9100");
    }
}
