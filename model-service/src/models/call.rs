//! Call model: an observation that an individual carries a variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Join entity between an individual and a variant. The links are nullable:
/// deleting either endpoint orphans the call rather than cascading.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Call {
    pub id: Uuid,
    pub individual_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    pub genotype: String,
    pub fmt: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating a call. Both links are required at creation time.
#[derive(Debug, Clone)]
pub struct CreateCall {
    pub id: Option<Uuid>,
    pub individual_id: Uuid,
    pub variant_id: Uuid,
    pub genotype: String,
    pub fmt: Option<String>,
}

/// Partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateCall {
    pub individual_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    pub genotype: Option<String>,
    pub fmt: Option<String>,
}
