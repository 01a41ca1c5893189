//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / environment          config file (TOML)
//!     → cli.rs (clap)         or   → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::{
    AdmissionConfig, FilterConfig, LimitsConfig, ListenerConfig, MatchMode, ObservabilityConfig,
    ProxyConfig, ThrottleConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
