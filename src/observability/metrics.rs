//! Metrics collection and exposition.
//!
//! # Metrics
//! - `https_enforcement_decisions_total` (counter): decisions by outcome, method
//!   (extension methods are folded into `other`)
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so tests and
//!   deployments without the exporter pay nothing
//! - Exporter binds its own listener, separate from application traffic

use std::net::SocketAddr;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Counter of enforcement decisions.
pub const DECISIONS_TOTAL: &str = "https_enforcement_decisions_total";

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    ::metrics::describe_counter!(
        DECISIONS_TOTAL,
        "HTTPS enforcement decisions by outcome and method"
    );

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count one enforcement decision.
pub fn record_decision(outcome: &'static str, method: &Method) {
    ::metrics::counter!(
        DECISIONS_TOTAL,
        "outcome" => outcome,
        "method" => method_label(method)
    )
    .increment(1);
}

/// Bounded label for a method; extension methods share `other`.
fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "PATCH" => "PATCH",
        "DELETE" => "DELETE",
        "OPTIONS" => "OPTIONS",
        "TRACE" => "TRACE",
        "CONNECT" => "CONNECT",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rendered: &str) -> Vec<&str> {
        rendered
            .lines()
            .filter(|line| line.starts_with(DECISIONS_TOTAL))
            .collect()
    }

    #[test]
    fn test_extension_methods_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            for i in 0..1000 {
                let method = Method::from_bytes(format!("X{i}").as_bytes()).unwrap();
                record_decision("allow", &method);
            }
            record_decision("allow", &Method::GET);
            record_decision("reject", &Method::POST);
        });

        let rendered = handle.render();
        let lines = series(&rendered);
        assert_eq!(lines.len(), 3, "{rendered}");
        assert!(lines
            .iter()
            .any(|l| l.contains("method=\"other\"") && l.ends_with(" 1000")));
        assert!(lines.iter().any(|l| l.contains("method=\"GET\"")));
        assert!(lines.iter().any(|l| l.contains("method=\"POST\"")));
    }
}
