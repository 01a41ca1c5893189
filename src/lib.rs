//! Forwarding HTTP proxy library.
//!
//! Admission control, body filtering and consecutive-duplicate throttling in
//! front of a single upstream target.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod security;
pub mod throttle;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::ProxyPipeline;
