//! Duplicate-request throttling.
//!
//! # Data Flow
//! ```text
//! Filtered request
//!     → snapshot.rs (method, target, URI, header subset, body)
//!     → detector.rs (compare with previous, replace, maybe delay)
//!     → continue to rewrite + forward
//! ```
//!
//! # Design Decisions
//! - Process-wide single slot: only immediately consecutive repeats are throttled
//! - Delay postpones forwarding, it never rejects

pub mod detector;
pub mod snapshot;

pub use detector::{DuplicateDetector, Verdict};
pub use snapshot::{HeaderSubset, RequestSnapshot};
