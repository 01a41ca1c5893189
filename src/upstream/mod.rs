//! Upstream transport subsystem.
//!
//! One configured target, one attempt per request. Connection pooling and TLS
//! come from `hyper-util` and `hyper-rustls`.

pub mod forwarder;

pub use forwarder::{build_client, BackendForwarder, HttpClient};
