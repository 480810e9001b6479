//! Route pattern matching.
//!
//! # Responsibilities
//! - Match exact paths (`/ssl`)
//! - Match segment prefixes (`/account/*` covers `/account` and `/account/...`)
//! - Rank patterns so the most specific one wins
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Prefixes only match on segment boundaries, so `/ssl/*` never covers `/sslEcho`
//! - No regex to guarantee O(n) matching

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches exactly one path.
    Exact(String),
    /// Matches the prefix itself and everything below it.
    Prefix(String),
}

impl PathPattern {
    /// Compile a pattern string. A trailing `/*` marks a prefix pattern and
    /// a bare `/*` matches every path.
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/*") {
            Some(prefix) => PathPattern::Prefix(prefix.to_string()),
            None => PathPattern::Exact(pattern.to_string()),
        }
    }

    /// Returns true if the request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(expected) => path == expected,
            PathPattern::Prefix(prefix) => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }

    /// Ranking used when several patterns match; higher wins.
    /// Exact patterns always beat prefixes, longer prefixes beat shorter ones.
    pub fn specificity(&self) -> (bool, usize) {
        match self {
            PathPattern::Exact(p) => (true, p.len()),
            PathPattern::Prefix(p) => (false, p.len()),
        }
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathPattern::Exact(p) => write!(f, "{}", p),
            PathPattern::Prefix(p) => write!(f, "{}/*", p),
        }
    }
}
