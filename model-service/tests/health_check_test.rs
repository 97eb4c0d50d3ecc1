//! Health and metrics endpoint tests.
//!
//! Run with TEST_DATABASE_URL pointing at a scratch PostgreSQL database.

mod common;

use common::TestApp;

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn health_check_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "model-service");
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn readiness_check_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app.get("/ready").await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn metrics_endpoint_serves_prometheus_text() {
    let app = TestApp::spawn().await;

    // Touch the database so at least one metric family is registered
    app.create_individual("metrics probe").await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.unwrap();
    assert!(
        body.contains("model_entities_created_total"),
        "Metrics output should include the entity counter"
    );
}
