use crate::config::ModelConfig;
use crate::handlers;
use crate::services::Database;
use axum::{middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::request_log_middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. The pool inside `Database` is the only state
/// shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: ModelConfig,
    pub db: Database,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: ModelConfig) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            e
        })?;

        db.run_migrations().await.map_err(|e| {
            tracing::error!("Failed to run database migrations: {}", e);
            e
        })?;

        let state = AppState {
            config: config.clone(),
            db: db.clone(),
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .route(
                "/individuals",
                get(handlers::list_individuals).post(handlers::create_individual),
            )
            .route(
                "/individuals/:id",
                get(handlers::get_individual)
                    .put(handlers::replace_individual)
                    .delete(handlers::delete_individual),
            )
            .route(
                "/individuals/:id/variants",
                get(handlers::list_variants_by_individual),
            )
            .route(
                "/variants",
                get(handlers::list_variants).post(handlers::create_variant),
            )
            .route(
                "/variants/:id",
                get(handlers::get_variant)
                    .put(handlers::replace_variant)
                    .delete(handlers::delete_variant),
            )
            .route(
                "/variants/:id/individuals",
                get(handlers::list_individuals_by_variant),
            )
            .route(
                "/calls",
                get(handlers::list_calls).post(handlers::create_call),
            )
            .route(
                "/calls/:id",
                get(handlers::get_call)
                    .put(handlers::replace_call)
                    .delete(handlers::delete_call),
            )
            .layer(middleware::from_fn(request_log_middleware))
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
