//! Common test utilities for model-service integration tests.

use model_service::config::{DatabaseConfig, ModelConfig};
use model_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CommonConfig;
use std::sync::Once;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,model_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A spawned application plus an HTTP client pointed at it.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        init_tracing();

        let database_url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set to run database-backed tests");

        let config = ModelConfig {
            common: CommonConfig {
                port: 0,
                log_level: "debug".to_string(),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 2,
                min_connections: 1,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let address = format!("http://127.0.0.1:{}", port);

        // Wait for the server to accept requests
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp { address, client }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request")
    }

    /// Create an individual and return the response body.
    pub async fn create_individual(&self, description: &str) -> Value {
        let response = self
            .post("/individuals", &json!({ "description": description }))
            .await;
        assert_eq!(response.status().as_u16(), 201, "Failed to create individual");
        response.json().await.expect("Invalid individual body")
    }

    /// Create a variant and return the response body.
    pub async fn create_variant(
        &self,
        chromosome: &str,
        start: i64,
        reference: &str,
        alt: &str,
    ) -> Value {
        let response = self
            .post(
                "/variants",
                &json!({
                    "chromosome": chromosome,
                    "start": start,
                    "ref": reference,
                    "alt": alt,
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201, "Failed to create variant");
        response.json().await.expect("Invalid variant body")
    }

    /// Create a call and return the response body.
    pub async fn create_call(
        &self,
        individual_id: &str,
        variant_id: &str,
        genotype: &str,
    ) -> Value {
        let response = self
            .post(
                "/calls",
                &json!({
                    "individual_id": individual_id,
                    "variant_id": variant_id,
                    "genotype": genotype,
                    "fmt": "GT",
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201, "Failed to create call");
        response.json().await.expect("Invalid call body")
    }
}

/// A chromosome name unique to this test run, within the 10-char limit.
pub fn unique_chromosome() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("c{}", &hex[..8])
}
