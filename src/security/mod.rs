//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (+ Transport extension from the listener):
//!     → scheme.rs (TLS connection? X-Forwarded-Proto says https?)
//!     → routing::EndpointPolicy (is the path SSL-only?)
//!     → methods.rs (may this method be redirected?)
//!     → enforcement.rs (Allow / Redirect 301 / Reject 403)
//!     → Pass to handler, or answer directly
//! ```
//!
//! # Design Decisions
//! - Fail closed: anything not provably secure is insecure
//! - No trust in client input unless configured (`forwarded_proto = "trusted"`)
//! - Submissions are refused, never redirected

pub mod enforcement;
pub mod methods;
pub mod scheme;

pub use enforcement::{enforce_https, HttpsEnforcer, Outcome, SSL_REQUIRED_BODY};
pub use methods::{MethodClass, MethodPolicy};
pub use scheme::{Evidence, Scheme, Transport, X_FORWARDED_PROTO};
