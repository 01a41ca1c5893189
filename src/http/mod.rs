//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → middleware/ (request logging)
//!     → [proxy pipeline decides and forwards]
//!     → request.rs (X-Proxy-Request-ID on success)
//!     → response.rs (JSON error bodies on failure)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, X_PROXY_REQUEST_ID};
pub use response::{error_response, ErrorBody};
pub use server::HttpServer;
