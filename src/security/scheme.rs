//! Effective request scheme resolution.
//!
//! # Responsibilities
//! - Report whether the connection itself was TLS
//! - Classify `X-Forwarded-Proto` when the connection was plain
//! - Keep the evidence behind a secure result so trust can be applied later
//!
//! # Design Decisions
//! - Only exact, case-insensitive `https` counts; anything else is insecure
//! - The header is read whether or not it is trusted; trust is applied by the
//!   enforcer, not here
//! - Malformed header bytes degrade to insecure instead of erroring

use axum::http::{HeaderMap, HeaderName};

/// `X-Forwarded-Proto` header name.
pub const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// How the connection carrying a request reached us.
///
/// The listener that accepted the connection inserts this into the request
/// extensions. A request without it is treated as [`Transport::Plain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Plain,
    Tls,
}

/// Where a secure classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    /// The connection was terminated with TLS by this process.
    Transport,
    /// Only the forwarded-proto header claimed `https`.
    ForwardedHeader,
}

/// Effective scheme of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Secure(Evidence),
    Insecure,
}

impl Scheme {
    pub fn is_secure(&self) -> bool {
        matches!(self, Scheme::Secure(_))
    }

    /// Label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Secure(Evidence::Transport) => "https",
            Scheme::Secure(Evidence::ForwardedHeader) => "https-forwarded",
            Scheme::Insecure => "http",
        }
    }
}

/// Classify a single forwarded-proto value.
///
/// A comma separated list (`https, http`) is reduced to its first element,
/// which is the scheme the client used with the outermost proxy.
pub fn is_https_value(value: &str) -> bool {
    value
        .split(',')
        .next()
        .map(|first| first.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

/// Resolve the effective scheme from the transport and headers.
pub fn resolve(transport: Transport, headers: &HeaderMap) -> Scheme {
    if transport == Transport::Tls {
        return Scheme::Secure(Evidence::Transport);
    }

    let claims_https = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .map(is_https_value)
        .unwrap_or(false);

    if claims_https {
        Scheme::Secure(Evidence::ForwardedHeader)
    } else {
        Scheme::Insecure
    }
}
