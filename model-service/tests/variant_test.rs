//! Variant CRUD and filter integration tests.
//!
//! Run with TEST_DATABASE_URL pointing at a scratch PostgreSQL database.

mod common;

use common::{unique_chromosome, TestApp};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn create_then_get_roundtrip() {
    let app = TestApp::spawn().await;
    let chromosome = unique_chromosome();

    let response = app
        .post(
            "/variants",
            &json!({
                "chromosome": chromosome,
                "start": 100,
                "ref": "A",
                "alt": "T",
                "name": "rs100",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let location = response
        .headers()
        .get("location")
        .expect("Created response should carry a Location header")
        .to_str()
        .unwrap()
        .to_string();
    let body: serde_json::Value = response.json().await.unwrap();
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(location, format!("/variants/{}", id));

    let body: serde_json::Value = app
        .get(&format!("/variants/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["chromosome"], chromosome.as_str());
    assert_eq!(body["start"], 100);
    assert_eq!(body["ref"], "A");
    assert_eq!(body["alt"], "T");
    assert_eq!(body["name"], "rs100");
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn duplicate_natural_key_conflicts_and_keeps_one_row() {
    let app = TestApp::spawn().await;
    let chromosome = unique_chromosome();

    app.create_variant(&chromosome, 100, "A", "T").await;

    // Same tuple, different name, no id: still a duplicate
    let response = app
        .post(
            "/variants",
            &json!({
                "chromosome": chromosome,
                "start": 100,
                "ref": "A",
                "alt": "T",
                "name": "other",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], 409);

    let listed: serde_json::Value = app
        .get(&format!("/variants?chromosome={}", chromosome))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(
        listed.as_array().unwrap().len(),
        1,
        "Store should hold exactly one variant with the tuple"
    );
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn range_filter_is_half_open() {
    let app = TestApp::spawn().await;
    let chromosome = unique_chromosome();

    app.create_variant(&chromosome, 100, "A", "T").await;
    app.create_variant(&chromosome, 150, "C", "G").await;
    app.create_variant(&chromosome, 200, "G", "C").await;

    let listed: serde_json::Value = app
        .get(&format!(
            "/variants?chromosome={}&start=100&end=200",
            chromosome
        ))
        .await
        .json()
        .await
        .unwrap();

    let starts: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["start"].as_i64().unwrap())
        .collect();
    assert_eq!(starts, vec![100, 150], "end bound is exclusive");
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn invalid_payload_is_rejected_with_400() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/variants",
            &json!({
                "chromosome": "",
                "start": -5,
                "ref": "A",
                "alt": "T",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], 400);
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn malformed_json_is_rejected_with_400() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/variants"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn replace_applies_fields_and_preserves_id_and_created() {
    let app = TestApp::spawn().await;
    let chromosome = unique_chromosome();

    let created = app.create_variant(&chromosome, 100, "A", "T").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/variants/{}", id),
            &json!({
                "id": Uuid::new_v4(),
                "created": "2000-01-01T00:00:00Z",
                "start": 123,
                "name": "renamed",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 204);

    let body: serde_json::Value = app
        .get(&format!("/variants/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["id"], id);
    assert_eq!(body["created"], created["created"]);
    assert_eq!(body["start"], 123);
    assert_eq!(body["name"], "renamed");
    // Untouched fields survive the partial update
    assert_eq!(body["chromosome"], chromosome.as_str());
    assert_eq!(body["ref"], "A");
    assert_eq!(body["alt"], "T");
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn delete_twice_returns_204_then_404() {
    let app = TestApp::spawn().await;
    let chromosome = unique_chromosome();

    let created = app.create_variant(&chromosome, 100, "A", "T").await;
    let id = created["id"].as_str().unwrap();

    let response = app.delete(&format!("/variants/{}", id)).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.delete(&format!("/variants/{}", id)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn get_unknown_variant_returns_404_with_message() {
    let app = TestApp::spawn().await;

    let response = app.get(&format!("/variants/{}", Uuid::new_v4())).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], 404);
    assert!(!body["message"].as_str().unwrap().is_empty());
}
