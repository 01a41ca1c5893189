//! Proxy orchestration.
//!
//! The pipeline owns the only cross-request mutable state (the duplicate
//! detector's last-request slot) and sequences every other component.

pub mod pipeline;

pub use pipeline::ProxyPipeline;
