//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build one Axum router per listener, tagged with its transport
//! - Wire up middleware (request ID, tracing, timeout, body limit, enforcement)
//! - Serve plain HTTP and, when configured, HTTPS
//! - Stop both listeners on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, Extension, Router};
use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::net::listener::{ListenerError, Listeners};
use crate::net::tls::TlsError;
use crate::security::{enforce_https, HttpsEnforcer, Transport};

/// Error type for running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error("secure listener and TLS configuration must be provided together")]
    TlsMismatch,

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server hosting the application behind the enforcer.
pub struct HttpServer {
    config: Arc<AppConfig>,
    enforcer: Arc<HttpsEnforcer>,
}

impl HttpServer {
    /// Create a new server from validated configuration.
    pub fn new(config: AppConfig) -> Self {
        let enforcer = Arc::new(HttpsEnforcer::from_config(&config));
        Self {
            config: Arc::new(config),
            enforcer,
        }
    }

    /// Build the router served on a listener of the given transport.
    #[allow(deprecated)]
    pub fn router(&self, transport: Transport) -> Router {
        handlers::app_routes()
            .layer(middleware::from_fn_with_state(
                self.enforcer.clone(),
                enforce_https,
            ))
            .layer(Extension(transport))
            .layer(DefaultBodyLimit::max(self.config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// Serve until the shutdown receiver fires.
    ///
    /// `tls` must be provided exactly when `listeners.secure` is.
    pub async fn run(
        self,
        listeners: Listeners,
        tls: Option<RustlsConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let Listeners { plain, secure } = listeners;

        let secure = match (secure, tls) {
            (Some(listener), Some(tls)) => Some((listener, tls)),
            (None, None) => None,
            _ => return Err(ServerError::TlsMismatch),
        };

        tracing::info!(
            http = %plain.local_addr()?,
            https = secure.is_some(),
            forwarded_proto = %self.enforcer.trust(),
            protected = ?self.enforcer.endpoints().protected_patterns(),
            "HTTP server starting"
        );

        let plain_app = self.router(Transport::Plain);
        let plain_shutdown = shutdown.resubscribe();
        let plain_server = async move {
            axum::serve(plain, plain_app)
                .with_graceful_shutdown(wait_for_shutdown(plain_shutdown))
                .await
                .map_err(ServerError::Io)
        };

        let secure_server = {
            let secure_app = self.router(Transport::Tls);
            let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
            let mut secure_shutdown = shutdown.resubscribe();
            async move {
                let Some((listener, tls)) = secure else {
                    return Ok(());
                };

                tracing::info!(address = %listener.local_addr()?, "HTTPS listener starting");

                let handle = axum_server::Handle::new();
                let trigger = handle.clone();
                tokio::spawn(async move {
                    let _ = secure_shutdown.recv().await;
                    trigger.graceful_shutdown(Some(grace));
                });

                axum_server::from_tcp_rustls(listener, tls)
                    .handle(handle)
                    .serve(secure_app.into_make_service())
                    .await
                    .map_err(ServerError::Io)
            }
        };

        tokio::try_join!(plain_server, secure_server)?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve once the shutdown coordinator fires (or is dropped).
async fn wait_for_shutdown(mut shutdown: broadcast::Receiver<()>) {
    let _ = shutdown.recv().await;
    tracing::info!("Shutdown signal received");
}
