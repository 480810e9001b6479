//! HTTPS enforcement server.
//!
//! # Architecture Overview
//!
//! ```text
//!   http_port  ──▶ listener (plain)  ──▶ Transport::Plain ─┐
//!                                                          ├─▶ enforce_https ──▶ handlers
//!   https_port ──▶ listener (rustls) ──▶ Transport::Tls  ──┘        │
//!                                                                   ├─▶ 301 Location: https://...
//!                                                                   └─▶ 403 SSL Required.
//! ```

use std::path::PathBuf;

use clap::Parser;

use https_enforcer::config::{self, AppConfig, ForwardedProtoTrust};
use https_enforcer::lifecycle::startup;
use https_enforcer::observability;

#[derive(Parser)]
#[command(name = "https-enforcer")]
#[command(about = "Serve SSL-only endpoints with HTTPS redirect/reject enforcement", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.http_port.
    #[arg(long)]
    http_port: Option<u16>,

    /// Override listener.https_port.
    #[arg(long)]
    https_port: Option<u16>,

    /// Treat X-Forwarded-Proto as authoritative.
    #[arg(long)]
    trust_forwarded_proto: bool,
}

fn build_config(cli: &Cli) -> Result<AppConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(port) = cli.http_port {
        config.listener.http_port = port;
    }
    if let Some(port) = cli.https_port {
        config.listener.https_port = port;
    }
    if cli.trust_forwarded_proto {
        config.enforcement.forwarded_proto = ForwardedProtoTrust::from_flag(true);
    }

    config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    observability::init_logging(&config.observability)?;

    tracing::info!("https-enforcer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        http_port = config.listener.http_port,
        https_port = config.listener.https_port,
        tls = config.tls.is_some(),
        forwarded_proto = %config.enforcement.forwarded_proto,
        endpoints = config.endpoints.len(),
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
