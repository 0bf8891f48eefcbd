//! API integration tests against a running server backed by MongoDB

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_root() {
    let client = Client::new();

    let response = client
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Welcome to the Library API");
}

#[tokio::test]
#[ignore]
async fn test_ready() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();

    // Create
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "category": "SF"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["_id"].as_str().expect("No book ID").to_string();
    assert_eq!(id.len(), 24);

    // Search
    let response = client
        .get(format!("{}/books?title=dun&author=herbert", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    let found = body
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|b| b["_id"] == id.as_str());
    assert!(found);

    // Partial update
    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .json(&json!({ "category": "Science-Fiction" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["category"], "Science-Fiction");
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Frank Herbert");

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_invalid_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/not-a-valid-id", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
