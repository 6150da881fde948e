//! Tests for the explorer client.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::explorer::{ExplorerClient, ExplorerConfig, ExplorerError};

const ADDRESS: &str = "RNZZecHLuoqUzNc9oE8ErkPFV1zJdvDBAH";

fn client_for(server: &MockServer) -> ExplorerClient {
    ExplorerClient::new(ExplorerConfig::new(server.uri()))
}

fn block(height: u64) -> serde_json::Value {
    json!({
        "height": height,
        "hash": format!("hash-{}", height),
        "previous_hash": format!("hash-{}", height - 1),
        "validator_address": "RValidator",
        "total_reward": 32.0,
        "version": 1,
        "craft_time": 120,
        "date_crafted": "2023-01-01T00:00:00Z",
        "transactions": [],
        "number_of_transactions": 0
    })
}

#[test]
fn test_default_base_url() {
    assert_eq!(ExplorerConfig::default().base_url, "https://data.rbx.network/api");
}

#[tokio::test]
async fn test_blocks_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blocks"))
        .and(query_param("limit", "2"))
        .and(query_param("page", "3"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 100,
            "page": 3,
            "num_pages": 50,
            "results": [block(96), block(95)]
        })))
        .mount(&server)
        .await;

    let page = client_for(&server).blocks(2, 3).await.unwrap();

    assert_eq!(page.count, 100);
    assert_eq!(page.page, 3);
    assert_eq!(page.num_pages, 50);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].height, 96);
    assert_eq!(page.results[1].previous_hash, "hash-94");
}

#[tokio::test]
async fn test_latest_blocks_uses_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blocks"))
        .and(query_param("limit", "10"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1, "page": 1, "num_pages": 1, "results": [block(7)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).latest_blocks().await.unwrap();
    assert_eq!(page.results[0].height, 7);
}

#[tokio::test]
async fn test_latest_block() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blocks"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 500, "page": 1, "num_pages": 500, "results": [block(500)]
        })))
        .mount(&server)
        .await;

    let latest = client_for(&server).latest_block().await.unwrap();
    assert_eq!(latest.height, 500);
    assert_eq!(latest.hash, "hash-500");
}

#[tokio::test]
async fn test_latest_block_empty_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0, "page": 1, "num_pages": 0, "results": []
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).latest_block().await;
    assert!(matches!(result, Err(ExplorerError::NoBlocks)));
}

#[tokio::test]
async fn test_address_and_balance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}", ADDRESS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": ADDRESS,
            "balance": 1250.75,
            "adnr": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client.address(ADDRESS).await.unwrap();
    assert_eq!(record.address, ADDRESS);
    assert!(record.extra.contains_key("adnr"));
    assert_eq!(client.balance(ADDRESS).await, 1250.75);
}

#[tokio::test]
async fn test_balance_degrades_to_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}", ADDRESS)))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.address(ADDRESS).await {
        Err(ExplorerError::ServerError {
            status_code,
            message,
        }) => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(client.balance(ADDRESS).await, 0.0);
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blocks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.blocks(10, 1).await,
        Err(ExplorerError::SerializationError(_))
    ));
    assert_eq!(client.balance(ADDRESS).await, 0.0);
}
