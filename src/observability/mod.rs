//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline stages produce:
//!     → logging.rs (structured log events, tagged with request IDs)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty in debug mode, JSON otherwise)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
