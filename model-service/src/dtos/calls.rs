use crate::models::{Call, CreateCall, UpdateCall};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCallRequest {
    pub id: Option<Uuid>,
    pub individual_id: Uuid,
    pub variant_id: Uuid,
    #[validate(length(min = 1, max = 20))]
    pub genotype: String,
    #[validate(length(max = 100))]
    pub fmt: Option<String>,
}

impl From<CreateCallRequest> for CreateCall {
    fn from(req: CreateCallRequest) -> Self {
        Self {
            id: req.id,
            individual_id: req.individual_id,
            variant_id: req.variant_id,
            genotype: req.genotype,
            fmt: req.fmt,
        }
    }
}

/// Body of PUT /calls/{id}. `id` and `created` are accepted but never
/// applied; all other fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceCallRequest {
    pub id: Option<Uuid>,
    pub created: Option<DateTime<Utc>>,
    pub individual_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    #[validate(length(min = 1, max = 20))]
    pub genotype: Option<String>,
    #[validate(length(max = 100))]
    pub fmt: Option<String>,
}

impl From<ReplaceCallRequest> for UpdateCall {
    fn from(req: ReplaceCallRequest) -> Self {
        Self {
            individual_id: req.individual_id,
            variant_id: req.variant_id,
            genotype: req.genotype,
            fmt: req.fmt,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub id: Uuid,
    pub individual_id: Option<Uuid>,
    pub variant_id: Option<Uuid>,
    pub genotype: String,
    pub fmt: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Call> for CallResponse {
    fn from(call: Call) -> Self {
        Self {
            id: call.id,
            individual_id: call.individual_id,
            variant_id: call.variant_id,
            genotype: call.genotype,
            fmt: call.fmt,
            created: call.created,
            updated: call.updated,
        }
    }
}
