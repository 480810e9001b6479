//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (policy lookup)
//!     → matcher.rs (evaluate path patterns)
//!     → Return: matched rule or None (open endpoint)
//!
//! Policy Compilation (at startup):
//!     EndpointConfig[]
//!     → Compile patterns (exact / segment prefix)
//!     → Sort by specificity
//!     → Freeze as immutable EndpointPolicy
//! ```
//!
//! # Design Decisions
//! - Policy compiled at startup, immutable at runtime
//! - Deterministic: same path always matches same rule
//! - Independent of the axum route table, so fallback paths are covered too

pub mod matcher;
pub mod router;

pub use matcher::PathPattern;
pub use router::EndpointPolicy;
