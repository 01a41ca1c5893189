//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → admission.rs (method gate, content-type gate)
//!     → [body captured]
//!     → content_filter.rs (forbidden phrase check)
//!     → ... forwarded ...
//!     → headers.rs (strip hop-by-hop before dispatch)
//! ```
//!
//! # Design Decisions
//! - Fail closed: the first failing check ends the request
//! - Checks are pure over the request parts; no shared state

pub mod admission;
pub mod content_filter;
pub mod headers;

pub use content_filter::ContentFilter;
