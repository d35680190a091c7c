#![allow(clippy::disallowed_methods)]
//! Product, merchant and shopping assistant tests against a mock backend.

use chat2pay_api::Chat2Pay;
use chat2pay_api::types::{NewProduct, ProductQuery};
use chat2pay_core::Error;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Chat2Pay {
    Chat2Pay::builder()
        .base_url(server.uri())
        .token("jwt-merchant")
        .build()
        .expect("Failed to build client")
}

fn product(id: &str, price: f64) -> Value {
    json!({
        "id": id,
        "merchant_id": "m-1",
        "name": format!("Product {id}"),
        "price": price,
        "stock": 4,
        "status": "active",
        "created_at": "2024-06-01T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_fetch_products_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("merchant_id", "m-1"))
        .and(query_param("page", "2"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": {"products": [product("p-1", 10500.0)], "total": 11, "page": 2, "limit": 10}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .fetch_products(&ProductQuery::merchant("m-1").page(2))
        .await
        .unwrap();
    assert_eq!(page.total, 11);
    assert_eq!(page.products[0].price, dec!(10500));
}

#[tokio::test]
async fn test_merchant_products_empty_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("merchant_id", "m-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true, "data": null})))
        .mount(&server)
        .await;

    let products = client_for(&server)
        .fetch_merchant_products("m-9")
        .await
        .unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_fetch_product_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": false, "data": "", "error": "product not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_product("missing")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "product not found");
}

#[tokio::test]
async fn test_blank_ids_rejected_locally() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    assert!(matches!(
        client.fetch_product(" ").await,
        Err(Error::InvalidRequest(_))
    ));
    assert!(matches!(
        client.fetch_merchant("").await,
        Err(Error::InvalidRequest(_))
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_product_merges_merchant_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": true, "data": product("p-new", 25000.0)
        })))
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_product(
            "m-1",
            &NewProduct {
                name: "Kopi Gayo".into(),
                price: dec!(25000),
                stock: 12,
                weight: Some(250),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, "p-new");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["merchant_id"], "m-1");
    assert_eq!(body["name"], "Kopi Gayo");
    assert_eq!(body["weight"], 250);
    assert!(body["price"].is_number());
    assert!(body.get("description").is_none());
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Bearer jwt-merchant"
    );
}

#[tokio::test]
async fn test_ask_product() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/products/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": {"products": [product("p-1", 1.0), product("p-2", 2.0)], "message": "Found 2"}
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .ask_product("cheap snacks")
        .await
        .unwrap();
    assert_eq!(reply.message, "Found 2");
    assert_eq!(reply.products.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"prompt": "cheap snacks"}));
}

#[tokio::test]
async fn test_merchants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/merchants"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": {
                "merchants": [{"id": 1, "name": "Toko A", "email": "a@toko.id", "status": "active"}],
                "total": 1, "page": 1, "limit": 5
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/merchants/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": {"id": 1, "name": "Toko A", "legal_name": "PT Toko A", "email": "a@toko.id", "status": "active"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let list = client.fetch_merchants(None, Some(5)).await.unwrap();
    assert_eq!(list.merchants[0].id, "1");

    let merchant = client.fetch_merchant("1").await.unwrap();
    assert_eq!(merchant.legal_name.as_deref(), Some("PT Toko A"));
}
