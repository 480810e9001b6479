//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize metrics when enabled
//! - Load TLS material and bind listeners
//! - Run the server until a termination signal arrives
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;

use crate::config::AppConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::shutdown_on_signal;
use crate::net::{load_tls_config, Listeners};
use crate::observability::metrics;

/// Start every subsystem and serve until SIGINT/SIGTERM.
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let tls = match &config.tls {
        Some(tls) => {
            let cert_path = Path::new(&tls.cert_path);
            let key_path = Path::new(&tls.key_path);
            Some(load_tls_config(cert_path, key_path).await?)
        }
        None => {
            tracing::warn!("No TLS configured; serving plain HTTP only");
            None
        }
    };

    let listeners = Listeners::bind(&config.listener, tls.is_some()).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        shutdown_on_signal(&shutdown).await;
    });

    server.run(listeners, tls, server_shutdown).await
}
