//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid and distinct)
//! - Detect duplicate or malformed endpoint patterns
//! - Check that the redirect method table parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{uri::Authority, Method};
use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.{field} must be non-zero")]
    ZeroPort { field: &'static str },

    #[error("listener.http_port and listener.https_port are both {port}")]
    PortConflict { port: u16 },

    #[error("endpoint pattern {pattern:?} must start with '/'")]
    RelativePattern { pattern: String },

    #[error("endpoint pattern {pattern:?} is declared more than once")]
    DuplicatePattern { pattern: String },

    #[error("enforcement.redirect_methods contains invalid method {method:?}")]
    InvalidMethod { method: String },

    #[error("enforcement.redirect_methods must not be empty")]
    NoRedirectMethods,

    #[error("enforcement.redirect_host {host:?} is not a host name")]
    InvalidRedirectHost { host: String },

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("observability.metrics_address {address:?} is not a socket address")]
    InvalidMetricsAddress { address: String },
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let listener = &config.listener;
    if listener.http_port == 0 {
        errors.push(ValidationError::ZeroPort { field: "http_port" });
    }
    if listener.https_port == 0 {
        errors.push(ValidationError::ZeroPort { field: "https_port" });
    }
    if listener.http_port != 0 && listener.http_port == listener.https_port {
        errors.push(ValidationError::PortConflict {
            port: listener.http_port,
        });
    }

    let mut seen = HashSet::new();
    for endpoint in &config.endpoints {
        if !endpoint.pattern.starts_with('/') {
            errors.push(ValidationError::RelativePattern {
                pattern: endpoint.pattern.clone(),
            });
        }
        if !seen.insert(endpoint.pattern.as_str()) {
            errors.push(ValidationError::DuplicatePattern {
                pattern: endpoint.pattern.clone(),
            });
        }
    }

    let enforcement = &config.enforcement;
    if enforcement.redirect_methods.is_empty() {
        errors.push(ValidationError::NoRedirectMethods);
    }
    for method in &enforcement.redirect_methods {
        if Method::from_bytes(method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod {
                method: method.clone(),
            });
        }
    }
    let host_is_valid = enforcement
        .redirect_host
        .parse::<Authority>()
        .map(|authority| !authority.host().is_empty() && authority.as_str() == authority.host())
        .unwrap_or(false);
    if !host_is_valid {
        errors.push(ValidationError::InvalidRedirectHost {
            host: enforcement.redirect_host.clone(),
        });
    }
    if enforcement.redirect_port == Some(0) {
        errors.push(ValidationError::ZeroValue {
            field: "enforcement.redirect_port",
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "timeouts.request_secs",
        });
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "limits.max_body_size",
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress {
            address: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EndpointConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_port_conflict() {
        let mut config = AppConfig::default();
        config.listener.https_port = config.listener.http_port;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::PortConflict { port: 8087 }]);
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.listener.http_port = 0;
        config.endpoints.push(EndpointConfig::ssl_only("ssl"));
        config.endpoints.push(EndpointConfig::open("/ssl"));
        config.enforcement.redirect_methods = vec!["GET".into(), "NOT A METHOD".into()];
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroPort { field: "http_port" }));
        assert!(errors.contains(&ValidationError::RelativePattern {
            pattern: "ssl".into()
        }));
        assert!(errors.contains(&ValidationError::DuplicatePattern {
            pattern: "/ssl".into()
        }));
        assert!(errors.contains(&ValidationError::InvalidMethod {
            method: "NOT A METHOD".into()
        }));
    }

    #[test]
    fn test_empty_method_table_rejected() {
        let mut config = AppConfig::default();
        config.enforcement.redirect_methods.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoRedirectMethods]);
    }

    #[test]
    fn test_redirect_host_must_be_bare_host() {
        for host in ["secure.example.com", "127.0.0.1", "[::1]"] {
            let mut config = AppConfig::default();
            config.enforcement.redirect_host = host.into();
            assert!(validate_config(&config).is_ok(), "{host}");
        }

        for host in ["", "localhost:7443", "user@localhost", "bad host"] {
            let mut config = AppConfig::default();
            config.enforcement.redirect_host = host.into();
            assert_eq!(
                validate_config(&config).unwrap_err(),
                vec![ValidationError::InvalidRedirectHost { host: host.into() }],
                "{host}"
            );
        }
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidMetricsAddress {
                address: "nowhere".into()
            }]
        );
    }
}
