use crate::models::{CreateIndividual, Individual, UpdateIndividual};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateIndividualRequest {
    pub id: Option<Uuid>,
    #[validate(length(max = 100))]
    pub description: Option<String>,
}

impl From<CreateIndividualRequest> for CreateIndividual {
    fn from(req: CreateIndividualRequest) -> Self {
        Self {
            id: req.id,
            description: req.description,
        }
    }
}

/// Body of PUT /individuals/{id}. `id` and `created` are accepted so stale
/// client copies round-trip, but they are never applied.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceIndividualRequest {
    pub id: Option<Uuid>,
    pub created: Option<DateTime<Utc>>,
    #[validate(length(max = 100))]
    pub description: Option<String>,
}

impl From<ReplaceIndividualRequest> for UpdateIndividual {
    fn from(req: ReplaceIndividualRequest) -> Self {
        Self {
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndividualResponse {
    pub id: Uuid,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Individual> for IndividualResponse {
    fn from(individual: Individual) -> Self {
        Self {
            id: individual.id,
            description: individual.description,
            created: individual.created,
            updated: individual.updated,
        }
    }
}
