//! HTTPS enforcement for SSL-only endpoints.
//!
//! Requests reaching an SSL-only endpoint over plain HTTP are redirected to
//! the HTTPS origin (safe methods) or refused with `403 SSL Required.`
//! (everything else). `X-Forwarded-Proto` only counts as proof of HTTPS when
//! the deployment marks it as trusted.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::{HttpsEnforcer, Outcome};
