//! HTTPS enforcement middleware.
//!
//! Every request is classified exactly once, before the application handler
//! runs:
//!
//! ```text
//! endpoint not SSL-only                      → Allow
//! genuinely secure (TLS, or trusted header)  → Allow
//! method not redirect-eligible               → Reject 403 "SSL Required."
//! redirect target can be built               → Redirect 301 Location: https://...
//! otherwise                                  → Reject 403 "SSL Required."
//! ```
//!
//! An untrusted `X-Forwarded-Proto: https` is never enough to reach a
//! protected handler. It is treated like any other insecure request, so a
//! plausible header and a nonsense one produce the same redirect.
//!
//! # Usage
//!
//! ```ignore
//! let enforcer = Arc::new(HttpsEnforcer::from_config(&config));
//! let app = Router::new()
//!     .route("/ssl", get(handler))
//!     .layer(middleware::from_fn_with_state(enforcer, enforce_https))
//!     .layer(Extension(Transport::Plain));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header,
        uri::{Authority, PathAndQuery},
        HeaderMap, Method, StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::{AppConfig, ForwardedProtoTrust};
use crate::http::request::request_id;
use crate::observability::metrics;
use crate::routing::EndpointPolicy;
use crate::security::methods::{MethodClass, MethodPolicy};
use crate::security::scheme::{self, Evidence, Scheme, Transport};

/// Body of every rejection.
pub const SSL_REQUIRED_BODY: &str = "SSL Required.";

/// Status of every rejection.
pub const SSL_REQUIRED_STATUS: StatusCode = StatusCode::FORBIDDEN;

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The method cannot be safely upgraded by a redirect.
    MethodNotRedirectable,
    /// The secure URL could not be assembled from the host and port.
    NoRedirectTarget,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MethodNotRedirectable => "method not redirectable",
            RejectReason::NoRedirectTarget => "no redirect target",
        }
    }
}

/// Result of classifying one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    Redirect(Uri),
    Reject(RejectReason),
}

impl Outcome {
    /// Label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Allow => "allow",
            Outcome::Redirect(_) => "redirect",
            Outcome::Reject(_) => "reject",
        }
    }
}

/// Full classification, kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub protected: bool,
    pub scheme: Scheme,
    pub outcome: Outcome,
}

/// Immutable enforcement state shared by every request.
#[derive(Debug, Clone)]
pub struct HttpsEnforcer {
    endpoints: EndpointPolicy,
    trust: ForwardedProtoTrust,
    methods: MethodPolicy,
    redirect_host: String,
    redirect_from_host_header: bool,
    redirect_port: u16,
}

impl HttpsEnforcer {
    /// Build the enforcer from validated configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let enforcement = &config.enforcement;
        Self {
            endpoints: EndpointPolicy::from_config(&config.endpoints),
            trust: enforcement.forwarded_proto,
            methods: MethodPolicy::from_names(&enforcement.redirect_methods),
            redirect_host: enforcement.redirect_host.clone(),
            redirect_from_host_header: enforcement.redirect_from_host_header,
            redirect_port: enforcement
                .redirect_port
                .unwrap_or(config.listener.https_port),
        }
    }

    pub fn endpoints(&self) -> &EndpointPolicy {
        &self.endpoints
    }

    pub fn trust(&self) -> ForwardedProtoTrust {
        self.trust
    }

    /// Classify a request.
    pub fn decide<B>(&self, request: &axum::http::Request<B>) -> Decision {
        let transport = request
            .extensions()
            .get::<Transport>()
            .copied()
            .unwrap_or_default();
        self.decide_parts(request.method(), request.uri(), request.headers(), transport)
    }

    /// Classify a request from its parts.
    pub fn decide_parts(
        &self,
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        transport: Transport,
    ) -> Decision {
        let scheme = scheme::resolve(transport, headers);
        let protected = self.endpoints.requires_secure(uri.path());

        let outcome = if !protected || self.is_genuinely_secure(scheme) {
            Outcome::Allow
        } else if self.methods.classify(method) == MethodClass::RejectOnly {
            Outcome::Reject(RejectReason::MethodNotRedirectable)
        } else {
            match self.redirect_target(uri, headers) {
                Some(target) => Outcome::Redirect(target),
                None => Outcome::Reject(RejectReason::NoRedirectTarget),
            }
        };

        Decision {
            protected,
            scheme,
            outcome,
        }
    }

    fn is_genuinely_secure(&self, scheme: Scheme) -> bool {
        match scheme {
            Scheme::Secure(Evidence::Transport) => true,
            Scheme::Secure(Evidence::ForwardedHeader) => self.trust.is_trusted(),
            Scheme::Insecure => false,
        }
    }

    /// Same path and query on the secure origin.
    ///
    /// The request's path and query are copied byte for byte; dot segments
    /// and percent escapes are left for the client to interpret.
    pub fn redirect_target(&self, uri: &Uri, headers: &HeaderMap) -> Option<Uri> {
        let host = if self.redirect_from_host_header {
            request_host(uri, headers).unwrap_or_else(|| self.redirect_host.clone())
        } else {
            self.redirect_host.clone()
        };

        let authority = if self.redirect_port == 443 {
            host.parse::<Authority>().ok()?
        } else {
            format!("{}:{}", host, self.redirect_port)
                .parse::<Authority>()
                .ok()?
        };

        let path_and_query = uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Uri::builder()
            .scheme("https")
            .authority(authority)
            .path_and_query(path_and_query)
            .build()
            .ok()
    }
}

/// Host name (without port) the client addressed.
fn request_host(uri: &Uri, headers: &HeaderMap) -> Option<String> {
    let authority = match headers.get(header::HOST) {
        Some(value) => value.to_str().ok()?.parse::<axum::http::uri::Authority>().ok()?,
        None => uri.authority()?.clone(),
    };
    let host = authority.host();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// 301 to the secure URL.
pub fn redirect_response(target: &Uri) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, target.to_string())],
    )
        .into_response()
}

/// 403 with the fixed plain-text body.
pub fn ssl_required_response() -> Response {
    (SSL_REQUIRED_STATUS, SSL_REQUIRED_BODY).into_response()
}

/// Axum middleware applying the enforcer to every request.
pub async fn enforce_https(
    State(enforcer): State<Arc<HttpsEnforcer>>,
    request: Request,
    next: Next,
) -> Response {
    let decision = enforcer.decide(&request);
    metrics::record_decision(decision.outcome.label(), request.method());

    if !decision.protected {
        return next.run(request).await;
    }

    let request_id = request_id(request.headers());
    let method = request.method();
    let path = request.uri().path();

    match decision.outcome {
        Outcome::Allow => {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                scheme = decision.scheme.as_str(),
                "SSL-only request allowed"
            );
            next.run(request).await
        }
        Outcome::Redirect(target) => {
            tracing::info!(
                request_id = %request_id,
                method = %method,
                path = %path,
                scheme = decision.scheme.as_str(),
                location = %target,
                "Redirecting SSL-only request to HTTPS"
            );
            redirect_response(&target)
        }
        Outcome::Reject(reason) => {
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                scheme = decision.scheme.as_str(),
                reason = reason.as_str(),
                "SSL-only request rejected"
            );
            ssl_required_response()
        }
    }
}
