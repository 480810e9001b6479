//! TCP listener binding for the plain and secure ports.
//!
//! # Responsibilities
//! - Bind the HTTP port and, when TLS is configured, the HTTPS port
//! - Fail fast if either port is unavailable
//! - Report the addresses actually bound (port 0 picks a free port)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured address does not parse.
    #[error("Invalid bind address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// The bound sockets the server will serve on.
#[derive(Debug)]
pub struct Listeners {
    /// Plain HTTP listener.
    pub plain: TcpListener,
    /// HTTPS listener, handed to the TLS acceptor.
    pub secure: Option<std::net::TcpListener>,
}

impl Listeners {
    /// Bind the configured ports. The secure port is only bound when `tls` is set.
    pub async fn bind(config: &ListenerConfig, tls: bool) -> Result<Self, ListenerError> {
        let plain = bind_port(&config.bind_address, config.http_port).await?;

        let secure = if tls {
            let address = socket_addr(&config.bind_address, config.https_port)?;
            // axum-server's TLS acceptor takes a std listener; tokio leaves it non-blocking.
            let listener = bind_port(&config.bind_address, config.https_port)
                .await?
                .into_std()
                .map_err(|source| ListenerError::Bind { address, source })?;
            Some(listener)
        } else {
            None
        };

        Ok(Self { plain, secure })
    }

    /// Address of the plain listener.
    pub fn plain_addr(&self) -> std::io::Result<SocketAddr> {
        self.plain.local_addr()
    }

    /// Address of the secure listener, if any.
    pub fn secure_addr(&self) -> Option<std::io::Result<SocketAddr>> {
        self.secure.as_ref().map(|l| l.local_addr())
    }
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, ListenerError> {
    let address = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    };
    address.parse().map_err(|source| ListenerError::Address { address, source })
}

async fn bind_port(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let address = socket_addr(host, port)?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind { address, source })?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(address),
        "Listener bound"
    );
    Ok(listener)
}
