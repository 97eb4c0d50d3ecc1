//! Prometheus metrics for model-service.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder};

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "model_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Entity creation counter by resource.
pub static ENTITIES_CREATED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "model_entities_created_total",
        "Total number of entities created",
        &["resource"]
    )
    .expect("Failed to register entities_created")
});

/// Creates rejected by the existence check, by resource.
pub static CREATES_REJECTED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "model_creates_rejected_total",
        "Total number of creates rejected as duplicates",
        &["resource"]
    )
    .expect("Failed to register creates_rejected")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&ENTITIES_CREATED);
    Lazy::force(&CREATES_REJECTED);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
