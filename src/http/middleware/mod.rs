//! HTTP middleware applied in front of the proxy handler.

pub mod request_log;
pub mod timeout;

pub use request_log::request_log_middleware;
pub use timeout::request_timeout_middleware;
