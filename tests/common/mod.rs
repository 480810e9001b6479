//! Shared utilities for integration tests.

use std::path::Path;

use https_enforcer::config::AppConfig;
use https_enforcer::lifecycle::Shutdown;
use https_enforcer::net::{load_tls_config, Listeners};
use https_enforcer::HttpServer;
use tempfile::TempDir;

/// A running server on ephemeral ports. Dropping it shuts the server down.
pub struct TestServer {
    pub base_url: String,
    pub secure_base_url: String,
    _shutdown: Shutdown,
    _certs: TempDir,
}

/// Write a self-signed certificate for localhost into `dir`.
fn write_self_signed(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let certified = rcgen::generate_simple_self_signed(vec![
        "localhost".to_string(),
        "127.0.0.1".to_string(),
    ])
    .unwrap();
    let cert_path = dir.join("cert.pem");
    let key_path = dir.join("key.pem");
    std::fs::write(&cert_path, certified.cert.pem()).unwrap();
    std::fs::write(&key_path, certified.key_pair.serialize_pem()).unwrap();
    (cert_path, key_path)
}

/// Boot the server with both listeners on 127.0.0.1.
pub async fn start_server(mut config: AppConfig) -> TestServer {
    let certs = tempfile::tempdir().unwrap();
    let (cert_path, key_path) = write_self_signed(certs.path());
    let tls = load_tls_config(&cert_path, &key_path).await.unwrap();

    config.listener.bind_address = "127.0.0.1".into();
    config.listener.http_port = 0;
    config.listener.https_port = 0;
    let listeners = Listeners::bind(&config.listener, true).await.unwrap();

    // Redirect targets are built from the real secure port.
    let http_port = listeners.plain_addr().unwrap().port();
    let https_port = listeners.secure_addr().unwrap().unwrap().port();
    config.listener.http_port = http_port;
    config.listener.https_port = https_port;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listeners, Some(tls), server_shutdown).await;
    });

    TestServer {
        base_url: format!("http://localhost:{}", http_port),
        secure_base_url: format!("https://localhost:{}", https_port),
        _shutdown: shutdown,
        _certs: certs,
    }
}

/// Client that reports the first response without following redirects.
#[allow(dead_code)]
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .build()
        .unwrap()
}

/// Client that follows redirects like a browser.
#[allow(dead_code)]
pub fn following_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .build()
        .unwrap()
}
