//! Individual model: a subject variants are called against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Individual {
    pub id: Uuid,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating an individual. A missing `id` gets a fresh UUID.
#[derive(Debug, Clone)]
pub struct CreateIndividual {
    pub id: Option<Uuid>,
    pub description: Option<String>,
}

/// Partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateIndividual {
    pub description: Option<String>,
}
