#![allow(clippy::disallowed_methods)] // unwrap() is acceptable in tests

use super::*;
use crate::error::Error;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(HttpConfig::with_base_url(server.uri())).unwrap()
}

async fn only_request(server: &MockServer) -> wiremock::Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

#[test]
fn test_http_client_creation() {
    assert!(HttpClient::new(HttpConfig::default()).is_ok());
}

#[test]
fn test_invalid_proxy_rejected() {
    let config = HttpConfig {
        proxy: Some(crate::config::ProxyConfig::new("not a proxy url")),
        ..HttpConfig::default()
    };
    assert!(HttpClient::new(config).is_err());
}

#[test]
fn test_resolve_url() {
    let client = HttpClient::new(HttpConfig::with_base_url("http://api.test//")).unwrap();
    assert_eq!(client.resolve_url("api/products"), "http://api.test/api/products");
    assert_eq!(client.resolve_url("  /api/orders "), "http://api.test/api/orders");
    assert_eq!(client.resolve_url(""), "http://api.test/");
    assert_eq!(
        client.resolve_url("HTTPS://cdn.test/img.png"),
        "HTTPS://cdn.test/img.png"
    );
}

#[test]
fn test_config_validation() {
    let config = HttpConfig::default();
    assert!(config.validate().unwrap().has_warnings());

    let config = HttpConfig {
        max_response_size: 0,
        ..HttpConfig::with_base_url("http://localhost")
    };
    assert_eq!(
        config.validate().unwrap_err().field_name(),
        "max_response_size"
    );

    let config = HttpConfig::with_base_url("nonsense");
    assert_eq!(config.validate().unwrap_err().field_name(), "base_url");
}

#[tokio::test]
async fn test_get_with_query_and_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = ReadOptions::default()
        .with_param("page", 2)
        .with_param("merchant_id", QueryValue::Null);
    let response = client.get("/api/products", options).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.data, Some(json!({"status": true})));
    let request = only_request(&server).await;
    assert_eq!(request.url.query(), Some("page=2"));
}

#[tokio::test]
async fn test_array_query_repeats_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = Query::new().with_many("id", [1, 2, 3]);
    client
        .get("/api/products?sort=asc", ReadOptions::with_query(query))
        .await
        .unwrap();

    let request = only_request(&server).await;
    assert_eq!(request.url.query(), Some("sort=asc&id=1&id=2&id=3"));
}

#[tokio::test]
async fn test_post_json_sets_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/customer/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "a@b.c", "password": "pw"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = RequestOptions::default()
        .with_json(&json!({"email": "a@b.c", "password": "pw"}))
        .unwrap();
    let response = client
        .post("/api/auth/customer/login", options)
        .await
        .unwrap();
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_caller_content_type_kept_and_json_wins_over_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = RequestOptions::default()
        .with_body("raw")
        .with_json_value(json!({"name": "Shoe"}))
        .with_header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/vnd.chat2pay+json"),
        );
    client.put("/api/products/1", options).await.unwrap();

    let request = only_request(&server).await;
    assert_eq!(
        request.headers.get("content-type").unwrap(),
        "application/vnd.chat2pay+json"
    );
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body, json!({"name": "Shoe"}));
}

#[tokio::test]
async fn test_raw_body_sent_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .patch("/upload", RequestOptions::default().with_body(b"plain bytes".to_vec()))
        .await
        .unwrap();

    let request = only_request(&server).await;
    assert_eq!(request.body, b"plain bytes");
    assert!(request.headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_token_overrides_caller_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_token_provider(Arc::new(|| Some("abc".to_string())));
    let options =
        ReadOptions::default().with_header(AUTHORIZATION, HeaderValue::from_static("Bearer old"));
    client.get("/api/orders/customer", options).await.unwrap();
}

#[tokio::test]
async fn test_empty_token_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let session = SessionToken::new();
    let client = client_for(&server).with_token_provider(Arc::new(session.clone()));
    client.get("/a", ReadOptions::default()).await.unwrap();

    session.set("");
    client.get("/b", ReadOptions::default()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.headers.get("authorization").is_none()));
}

#[tokio::test]
async fn test_default_headers_overridden_by_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut config = HttpConfig::with_base_url(server.uri());
    let tenant = HeaderName::from_static("x-tenant");
    config
        .default_headers
        .insert(tenant.clone(), HeaderValue::from_static("default"));
    config
        .default_headers
        .insert("accept", HeaderValue::from_static("text/html"));
    let client = HttpClient::new(config).unwrap();

    let options = ReadOptions::default().with_header(tenant, HeaderValue::from_static("shop-7"));
    client.get("/", options).await.unwrap();

    let request = only_request(&server).await;
    assert_eq!(request.headers.get("x-tenant").unwrap(), "shop-7");
    assert_eq!(request.headers.get("accept").unwrap(), "text/html");
}

#[tokio::test]
async fn test_no_content_has_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(204).insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .delete("/api/chat/history", ReadOptions::default())
        .await
        .unwrap();
    assert_eq!(response.status, 204);
    assert!(response.data.is_none());
}

#[tokio::test]
async fn test_text_body_and_broken_json() {
    let server = MockServer::start().await;
    Mock::given(path("/text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{oops", "application/json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client.get("/text", ReadOptions::default()).await.unwrap();
    assert_eq!(text.data, Some(json!("pong")));

    let broken = client.get("/broken", ReadOptions::default()).await.unwrap();
    assert_eq!(broken.status, 200);
    assert!(broken.data.is_none());
}

#[tokio::test]
async fn test_error_message_from_payload() {
    let server = MockServer::start().await;
    Mock::given(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"message": "Invalid credentials"}))
                .insert_header("x-request-id", "req-9"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .post("/login", RequestOptions::default())
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.message, "Invalid credentials");
    assert_eq!(api.status, 401);
    assert_eq!(api.request_id.as_deref(), Some("req-9"));
    assert_eq!(err.payload(), Some(&json!({"message": "Invalid credentials"})));
}

#[tokio::test]
async fn test_error_without_json_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("{\"error\":\"hidden\"}"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get("/", ReadOptions::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status 502");
    assert!(err.payload().is_none());
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_per_call_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get(
            "/slow",
            ReadOptions::default().with_timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = HttpClient::new(HttpConfig::with_base_url("http://127.0.0.1:1")).unwrap();
    let err = client.get("/", ReadOptions::default()).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {err:?}");
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_response_size_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(1024)))
        .mount(&server)
        .await;

    let config = HttpConfig {
        max_response_size: 64,
        ..HttpConfig::with_base_url(server.uri())
    };
    let client = HttpClient::new(config).unwrap();
    let err = client.get("/big", ReadOptions::default()).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)), "got {err:?}");
}

#[tokio::test]
async fn test_oversized_error_body_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/12345"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "product not found, id 12345"}))
                .insert_header("x-request-id", "req-404"),
        )
        .mount(&server)
        .await;

    let config = HttpConfig {
        max_response_size: 16,
        ..HttpConfig::with_base_url(server.uri())
    };
    let client = HttpClient::new(config).unwrap();
    let err = client
        .get("/api/products/12345", ReadOptions::default())
        .await
        .unwrap_err();

    let api = err.as_api().expect("oversized error body must stay an API error");
    assert_eq!(api.status, 404);
    assert_eq!(api.message, "Request failed with status 404");
    assert_eq!(api.request_id.as_deref(), Some("req-404"));
    assert!(err.payload().is_none());
}

#[tokio::test]
async fn test_absolute_path_bypasses_base_url() {
    let server = MockServer::start().await;
    Mock::given(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(HttpConfig::with_base_url("http://127.0.0.1:1")).unwrap();
    let url = format!("{}/elsewhere", server.uri());
    client.get(&url, ReadOptions::default()).await.unwrap();
}
