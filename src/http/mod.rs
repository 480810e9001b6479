//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (plain) or TLS connection (secure)
//!     → server.rs (Axum router per listener, Transport extension)
//!     → request.rs (request ID)
//!     → security::enforce_https (allow / redirect / reject)
//!     → handlers.rs (application routes)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{HttpServer, ServerError};
