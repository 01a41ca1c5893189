//! Forwarding HTTP proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ admission ──▶ content type ──▶ body capture
//!                                                                        │
//!                                                                        ▼
//!                     forward ◀── rewrite ◀── duplicate check ◀── content filter
//!                        │                    (+ optional delay)
//!                        ▼
//!     ◀────────────── upstream status + body, X-Proxy-Request-ID
//!                     or {"code": "...", "msg": "..."} on any failure
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use proxy_service::config::Cli;
use proxy_service::lifecycle::signals::shutdown_on_signal;
use proxy_service::observability::{logging, metrics};
use proxy_service::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability);

    tracing::info!("proxy-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(config = ?config, "server configuration");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address();
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
