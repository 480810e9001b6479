//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the enforcer.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration, built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, ports).
    pub listener: ListenerConfig,

    /// Optional TLS material for the secure listener.
    pub tls: Option<TlsConfig>,

    /// Enforcement behaviour (trust, redirect target, method table).
    pub enforcement: EnforcementConfig,

    /// Per-route "SSL Only" declarations.
    pub endpoints: Vec<EndpointConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            tls: None,
            enforcement: EnforcementConfig::default(),
            endpoints: vec![
                EndpointConfig::ssl_only("/ssl"),
                EndpointConfig::ssl_only("/sslEcho"),
            ],
            timeouts: TimeoutConfig::default(),
            limits: LimitsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface both listeners bind to (e.g., "0.0.0.0").
    pub bind_address: String,

    /// Plain HTTP port.
    pub http_port: u16,

    /// HTTPS port. Also the default port used in redirect targets.
    pub https_port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            http_port: 8087,
            https_port: 7443,
        }
    }
}

/// TLS configuration for the secure listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Whether `X-Forwarded-Proto` is authoritative for this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForwardedProtoTrust {
    /// The header is read but never lets a request through on its own.
    #[default]
    Untrusted,

    /// A trusted proxy sets the header; `https` counts as a secure transport.
    Trusted,
}

impl ForwardedProtoTrust {
    /// Map a boolean-like flag onto a trust policy.
    pub fn from_flag(trusted: bool) -> Self {
        if trusted {
            Self::Trusted
        } else {
            Self::Untrusted
        }
    }

    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted)
    }
}

impl std::fmt::Display for ForwardedProtoTrust {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Untrusted => write!(f, "untrusted"),
            Self::Trusted => write!(f, "trusted"),
        }
    }
}

/// Enforcement configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnforcementConfig {
    /// Trust policy for `X-Forwarded-Proto`.
    pub forwarded_proto: ForwardedProtoTrust,

    /// Host of the secure origin used in redirect targets.
    pub redirect_host: String,

    /// Take the redirect host from the request's Host header instead, falling
    /// back to `redirect_host` when the header is missing. Only safe behind a
    /// proxy that rewrites Host.
    pub redirect_from_host_header: bool,

    /// Port used in redirect targets. Falls back to `listener.https_port`.
    pub redirect_port: Option<u16>,

    /// Methods that may be upgraded with a redirect. Every other method is
    /// rejected on an SSL-only endpoint.
    pub redirect_methods: Vec<String>,
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            forwarded_proto: ForwardedProtoTrust::Untrusted,
            redirect_host: "localhost".to_string(),
            redirect_from_host_header: false,
            redirect_port: None,
            redirect_methods: default_redirect_methods(),
        }
    }
}

fn default_redirect_methods() -> Vec<String> {
    ["GET", "HEAD", "OPTIONS", "TRACE"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// Security declaration for one route pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Exact path (`/ssl`) or segment prefix (`/account/*`).
    pub pattern: String,

    /// Route requires a secure scheme.
    #[serde(default = "default_ssl_only")]
    pub ssl_only: bool,
}

fn default_ssl_only() -> bool {
    true
}

impl EndpointConfig {
    pub fn ssl_only(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ssl_only: true,
        }
    }

    pub fn open(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ssl_only: false,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
