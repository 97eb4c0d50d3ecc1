//! Relationship traversal integration tests.
//!
//! Run with TEST_DATABASE_URL pointing at a scratch PostgreSQL database.

mod common;

use common::{unique_chromosome, TestApp};
use std::collections::HashSet;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn variants_by_individual_returns_exactly_the_called_variants() {
    let app = TestApp::spawn().await;

    let individual = app.create_individual("traversal subject").await;
    let individual_id = individual["id"].as_str().unwrap();

    let v1 = app.create_variant(&unique_chromosome(), 100, "A", "T").await;
    let v2 = app.create_variant(&unique_chromosome(), 200, "C", "G").await;
    // A third variant never called in this individual
    app.create_variant(&unique_chromosome(), 300, "G", "A").await;

    app.create_call(individual_id, v1["id"].as_str().unwrap(), "0/1")
        .await;
    app.create_call(individual_id, v2["id"].as_str().unwrap(), "1/1")
        .await;

    let response = app
        .get(&format!("/individuals/{}/variants", individual_id))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let got: HashSet<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect();
    let expected: HashSet<String> = [v1, v2]
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(got, expected);
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn individuals_by_variant_returns_every_called_individual() {
    let app = TestApp::spawn().await;

    let variant = app.create_variant(&unique_chromosome(), 100, "A", "T").await;
    let variant_id = variant["id"].as_str().unwrap();

    let i1 = app.create_individual("first carrier").await;
    let i2 = app.create_individual("second carrier").await;

    app.create_call(i1["id"].as_str().unwrap(), variant_id, "0/1")
        .await;
    app.create_call(i2["id"].as_str().unwrap(), variant_id, "1/1")
        .await;

    let response = app
        .get(&format!("/variants/{}/individuals", variant_id))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let got: HashSet<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();
    let expected: HashSet<String> = [i1, i2]
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(got, expected);
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn unknown_anchor_returns_404() {
    let app = TestApp::spawn().await;

    let response = app
        .get(&format!("/individuals/{}/variants", Uuid::new_v4()))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .get(&format!("/variants/{}/individuals", Uuid::new_v4()))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn deleting_an_endpoint_orphans_the_call_and_traversal_skips_it() {
    let app = TestApp::spawn().await;

    let variant = app.create_variant(&unique_chromosome(), 100, "A", "T").await;
    let variant_id = variant["id"].as_str().unwrap();

    let i1 = app.create_individual("to be deleted").await;
    let i2 = app.create_individual("survivor").await;

    let orphaned_call = app
        .create_call(i1["id"].as_str().unwrap(), variant_id, "0/1")
        .await;
    app.create_call(i2["id"].as_str().unwrap(), variant_id, "1/1")
        .await;

    let response = app
        .delete(&format!("/individuals/{}", i1["id"].as_str().unwrap()))
        .await;
    assert_eq!(response.status().as_u16(), 204);

    // The call survives with its individual link absent
    let body: serde_json::Value = app
        .get(&format!("/calls/{}", orphaned_call["id"].as_str().unwrap()))
        .await
        .json()
        .await
        .unwrap();
    assert!(body["individual_id"].is_null());
    assert_eq!(body["variant_id"], variant["id"]);

    // Traversal skips the orphan
    let body: serde_json::Value = app
        .get(&format!("/variants/{}/individuals", variant_id))
        .await
        .json()
        .await
        .unwrap();
    let got: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(got, vec![i2["id"].as_str().unwrap()]);
}
