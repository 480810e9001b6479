//! HTTPS behaviour when X-Forwarded-Proto is present but not trusted.

use https_enforcer::config::AppConfig;

mod common;

const VALID_PROTO: &str = "https";
const INVALID_PROTO: &str = "WrongProtocol";
const SSL_REQUIRED: &str = "SSL Required.";

fn form() -> [(&'static str, &'static str); 2] {
    [("key1", "Keyboard."), ("key2", "Cat.")]
}

#[tokio::test]
async fn test_open_endpoint_is_not_redirected() {
    let server = common::start_server(AppConfig::default()).await;

    let res = common::no_redirect_client()
        .get(&server.base_url)
        .header("X-Forwarded-Proto", VALID_PROTO)
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.headers().get("location").is_none());
}

#[tokio::test]
async fn test_ssl_only_endpoint_redirects_with_valid_untrusted_header() {
    let server = common::start_server(AppConfig::default()).await;

    let res = common::no_redirect_client()
        .get(format!("{}/ssl", server.base_url))
        .header("X-Forwarded-Proto", VALID_PROTO)
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 301);
    assert_eq!(
        res.headers().get("location").unwrap(),
        format!("{}/ssl", server.secure_base_url).as_str()
    );
}

#[tokio::test]
async fn test_ssl_only_endpoint_redirects_with_invalid_untrusted_header() {
    let server = common::start_server(AppConfig::default()).await;

    let res = common::no_redirect_client()
        .get(format!("{}/ssl", server.base_url))
        .header("X-Forwarded-Proto", INVALID_PROTO)
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 301);
    assert_eq!(
        res.headers().get("location").unwrap(),
        format!("{}/ssl", server.secure_base_url).as_str()
    );
}

#[tokio::test]
async fn test_following_redirect_lands_on_secure_endpoint() {
    let server = common::start_server(AppConfig::default()).await;

    let res = common::following_client()
        .get(format!("{}/ssl", server.base_url))
        .header("X-Forwarded-Proto", INVALID_PROTO)
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.url().as_str(), format!("{}/ssl", server.secure_base_url));
    assert_eq!(res.text().await.unwrap(), "Hello over HTTPS.");
}

#[tokio::test]
async fn test_post_with_valid_untrusted_header_is_forbidden() {
    let server = common::start_server(AppConfig::default()).await;
    let destination = format!("{}/sslEcho", server.base_url);

    let res = common::following_client()
        .post(&destination)
        .header("X-Forwarded-Proto", VALID_PROTO)
        .form(&form())
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 403);
    assert_eq!(res.url().as_str(), destination);
    assert_eq!(res.text().await.unwrap(), SSL_REQUIRED);
}

#[tokio::test]
async fn test_post_with_invalid_untrusted_header_is_forbidden() {
    let server = common::start_server(AppConfig::default()).await;
    let destination = format!("{}/sslEcho", server.base_url);

    let res = common::following_client()
        .post(&destination)
        .header("X-Forwarded-Proto", INVALID_PROTO)
        .form(&form())
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 403);
    assert_eq!(res.url().as_str(), destination);
    assert_eq!(res.text().await.unwrap(), SSL_REQUIRED);
}

#[tokio::test]
async fn test_post_over_tls_reaches_handler() {
    let server = common::start_server(AppConfig::default()).await;

    let res = common::no_redirect_client()
        .post(format!("{}/sslEcho", server.secure_base_url))
        .header("X-Forwarded-Proto", INVALID_PROTO)
        .form(&form())
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    let echoed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(echoed["key1"], "Keyboard.");
    assert_eq!(echoed["key2"], "Cat.");
}
