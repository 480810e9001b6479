//! Method classification for SSL-only endpoints.
//!
//! A redirect only upgrades navigation: clients are free to drop the body or
//! change the method when following a 301, so a submission is refused instead.
//! Which methods count as redirect-eligible is configuration; everything not
//! in the table, including extension methods, is reject-only.

use axum::http::Method;

/// What the enforcer may do with an insecure request of a given method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodClass {
    /// Safe to answer with a redirect to the secure URL.
    RedirectEligible,
    /// Must be rejected when not genuinely secure.
    RejectOnly,
}

/// Redirect-eligible method table.
#[derive(Debug, Clone)]
pub struct MethodPolicy {
    redirectable: Vec<Method>,
}

impl MethodPolicy {
    /// Build the table from method names. Names that do not parse are skipped;
    /// config validation reports them before this runs.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let redirectable = names
            .iter()
            .filter_map(|name| Method::from_bytes(name.as_ref().trim().as_bytes()).ok())
            .collect();
        Self { redirectable }
    }

    pub fn classify(&self, method: &Method) -> MethodClass {
        if self.redirectable.contains(method) {
            MethodClass::RedirectEligible
        } else {
            MethodClass::RejectOnly
        }
    }
}

impl Default for MethodPolicy {
    /// GET, HEAD, OPTIONS and TRACE.
    fn default() -> Self {
        Self {
            redirectable: vec![Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let policy = MethodPolicy::default();
        for method in [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE] {
            assert_eq!(policy.classify(&method), MethodClass::RedirectEligible);
        }
        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::CONNECT] {
            assert_eq!(policy.classify(&method), MethodClass::RejectOnly);
        }
    }

    #[test]
    fn test_extension_methods_reject_only() {
        let policy = MethodPolicy::default();
        let purge = Method::from_bytes(b"PURGE").unwrap();
        assert_eq!(policy.classify(&purge), MethodClass::RejectOnly);
    }

    #[test]
    fn test_from_names() {
        let policy = MethodPolicy::from_names(&["GET", " HEAD ", "bad method"]);
        assert_eq!(policy.classify(&Method::GET), MethodClass::RedirectEligible);
        assert_eq!(policy.classify(&Method::HEAD), MethodClass::RedirectEligible);
        assert_eq!(policy.classify(&Method::OPTIONS), MethodClass::RejectOnly);
    }

    #[test]
    fn test_method_names_are_case_sensitive() {
        // "get" is a distinct extension method, not GET.
        let policy = MethodPolicy::from_names(&["get"]);
        assert_eq!(policy.classify(&Method::GET), MethodClass::RejectOnly);
    }
}
