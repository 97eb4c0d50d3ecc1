use crate::models::{CreateVariant, UpdateVariant, Variant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVariantRequest {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 10))]
    pub chromosome: String,
    #[validate(range(min = 0))]
    pub start: i64,
    #[serde(rename = "ref")]
    #[validate(length(min = 1, max = 100))]
    pub reference: String,
    #[validate(length(min = 1, max = 100))]
    pub alt: String,
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

impl From<CreateVariantRequest> for CreateVariant {
    fn from(req: CreateVariantRequest) -> Self {
        Self {
            id: req.id,
            chromosome: req.chromosome,
            start: req.start,
            reference: req.reference,
            alt: req.alt,
            name: req.name,
        }
    }
}

/// Body of PUT /variants/{id}. `id` and `created` are accepted but never
/// applied; all other fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceVariantRequest {
    pub id: Option<Uuid>,
    pub created: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 10))]
    pub chromosome: Option<String>,
    #[validate(range(min = 0))]
    pub start: Option<i64>,
    #[serde(rename = "ref")]
    #[validate(length(min = 1, max = 100))]
    pub reference: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub alt: Option<String>,
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

impl From<ReplaceVariantRequest> for UpdateVariant {
    fn from(req: ReplaceVariantRequest) -> Self {
        Self {
            chromosome: req.chromosome,
            start: req.start,
            reference: req.reference,
            alt: req.alt,
            name: req.name,
        }
    }
}

/// Query parameters of GET /variants: chromosome equality plus a half-open
/// [start, end) position range.
#[derive(Debug, Deserialize)]
pub struct VariantListParams {
    pub chromosome: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct VariantResponse {
    pub id: Uuid,
    pub chromosome: String,
    pub start: i64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub alt: String,
    pub name: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Variant> for VariantResponse {
    fn from(variant: Variant) -> Self {
        Self {
            id: variant.id,
            chromosome: variant.chromosome,
            start: variant.start,
            reference: variant.reference,
            alt: variant.alt,
            name: variant.name,
            created: variant.created,
            updated: variant.updated,
        }
    }
}
