//! Variant model: a short genomic variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A short variant. (chromosome, start, ref, alt) is unique across the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Variant {
    pub id: Uuid,
    pub chromosome: String,
    pub start: i64,
    #[serde(rename = "ref")]
    #[sqlx(rename = "ref")]
    pub reference: String,
    pub alt: String,
    pub name: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating a variant. A missing `id` gets a fresh UUID.
#[derive(Debug, Clone)]
pub struct CreateVariant {
    pub id: Option<Uuid>,
    pub chromosome: String,
    pub start: i64,
    pub reference: String,
    pub alt: String,
    pub name: Option<String>,
}

/// Partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateVariant {
    pub chromosome: Option<String>,
    pub start: Option<i64>,
    pub reference: Option<String>,
    pub alt: Option<String>,
    pub name: Option<String>,
}

/// List filters: chromosome equality plus a half-open [start, end) range.
#[derive(Debug, Clone, Default)]
pub struct VariantFilter {
    pub chromosome: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
}
