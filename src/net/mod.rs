//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     listener.rs (bind http_port, and https_port when TLS is configured)
//!     tls.rs (load PEM certificate chain + key)
//!     → Hand both to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Both ports are bound before any traffic is served
//! - TLS is optional; without it only the plain listener runs
//! - Handshakes are left to rustls via axum-server

pub mod listener;
pub mod tls;

pub use listener::{ListenerError, Listeners};
pub use tls::{load_tls_config, TlsError};
