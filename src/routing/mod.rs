//! Upstream routing.
//!
//! There is exactly one target, so routing reduces to rewriting every
//! accepted request against the configured base URL.
//!
//! # Data Flow
//! ```text
//! inbound parts + captured body
//!     → rewrite.rs (scheme/authority, path join, query merge, header sanitize)
//!     → upstream request ready for dispatch
//! ```

pub mod rewrite;

pub use rewrite::RequestRewriter;
