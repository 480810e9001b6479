//! Endpoint security policy lookup.
//!
//! # Responsibilities
//! - Store compiled route patterns with their SSL-only flag
//! - Look up the policy for a request path
//! - Default to "not protected" when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) pattern scan (acceptable for typical route counts)
//! - Most specific pattern wins, so an open exact path can carve a hole
//!   out of a protected prefix

use crate::config::EndpointConfig;
use crate::routing::matcher::PathPattern;

/// A compiled endpoint declaration.
#[derive(Debug, Clone)]
pub struct EndpointRule {
    pub pattern: PathPattern,
    pub ssl_only: bool,
}

/// Route pattern → "requires secure scheme" table.
#[derive(Debug, Clone, Default)]
pub struct EndpointPolicy {
    /// Rules sorted by descending specificity.
    rules: Vec<EndpointRule>,
}

impl EndpointPolicy {
    /// Compile the policy from configuration.
    pub fn from_config(endpoints: &[EndpointConfig]) -> Self {
        let mut rules: Vec<EndpointRule> = endpoints
            .iter()
            .map(|e| EndpointRule {
                pattern: PathPattern::parse(&e.pattern),
                ssl_only: e.ssl_only,
            })
            .collect();

        rules.sort_by(|a, b| b.pattern.specificity().cmp(&a.pattern.specificity()));

        Self { rules }
    }

    /// First (most specific) rule matching the path, if any.
    pub fn match_path(&self, path: &str) -> Option<&EndpointRule> {
        self.rules.iter().find(|rule| rule.pattern.matches(path))
    }

    /// Whether the path is an "SSL Only" endpoint. Unmatched paths are open.
    pub fn requires_secure(&self, path: &str) -> bool {
        self.match_path(path).map(|rule| rule.ssl_only).unwrap_or(false)
    }

    /// Patterns that require a secure scheme, for startup logging.
    pub fn protected_patterns(&self) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.ssl_only)
            .map(|rule| rule.pattern.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(endpoints: Vec<EndpointConfig>) -> EndpointPolicy {
        EndpointPolicy::from_config(&endpoints)
    }

    #[test]
    fn test_unmatched_paths_are_open() {
        let policy = policy(vec![EndpointConfig::ssl_only("/ssl")]);
        assert!(!policy.requires_secure("/"));
        assert!(!policy.requires_secure("/other"));
        assert!(!EndpointPolicy::default().requires_secure("/ssl"));
    }

    #[test]
    fn test_exact_routes() {
        let policy = policy(vec![
            EndpointConfig::ssl_only("/ssl"),
            EndpointConfig::ssl_only("/sslEcho"),
        ]);
        assert!(policy.requires_secure("/ssl"));
        assert!(policy.requires_secure("/sslEcho"));
        assert!(!policy.requires_secure("/ssl/nested"));
    }

    #[test]
    fn test_most_specific_rule_wins() {
        let policy = policy(vec![
            EndpointConfig::ssl_only("/account/*"),
            EndpointConfig::open("/account/help"),
            EndpointConfig::open("/*"),
        ]);

        assert!(policy.requires_secure("/account"));
        assert!(policy.requires_secure("/account/settings"));
        assert!(!policy.requires_secure("/account/help"));
        assert!(!policy.requires_secure("/"));
        assert_eq!(policy.protected_patterns(), vec!["/account/*"]);
    }
}
