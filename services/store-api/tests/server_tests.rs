//! Tests for the storefront HTTP server.

use std::net::SocketAddr;

use store_api::StoreServer;

async fn start_server() -> StoreServer {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    StoreServer::start(addr).await.unwrap()
}

#[tokio::test]
async fn test_home_page_lists_featured_albums() {
    let server = start_server().await;
    let url = format!("http://{}/", server.local_addr());

    let response = reqwest::get(&url).await.unwrap();
    assert!(response.status().is_success());

    let body = response.text().await.unwrap();
    assert!(body.contains("Music Store"));
    assert!(body.contains("For Those About To Rock"));
}

#[tokio::test]
async fn test_albums_endpoint_returns_catalog() {
    let server = start_server().await;
    let url = format!("http://{}/api/albums", server.local_addr());

    let albums: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    let albums = albums.as_array().unwrap();

    assert_eq!(albums.len(), 8);
    assert_eq!(albums[0]["id"], 1);
    assert_eq!(albums[0]["artist"], "Men At Work");
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = start_server().await;
    let url = format!("http://{}/health", server.local_addr());

    let response = reqwest::get(&url).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_shutdown_stops_serving() {
    let server = start_server().await;
    let url = format!("http://{}/health", server.local_addr());

    server.shutdown();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert!(reqwest::get(&url).await.is_err());
}
