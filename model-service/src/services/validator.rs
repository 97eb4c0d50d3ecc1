//! Create-path existence checks.
//!
//! Each check runs before the insert so a duplicate gets a clean Conflict
//! response instead of falling through to the storage constraint. The
//! constraint still backstops races between check and insert.

use crate::services::Database;
use service_core::error::AppError;
use uuid::Uuid;

/// True iff the id is given and resolves. Individuals carry no natural key;
/// a description is not required to be unique.
pub async fn individual_exists(db: &Database, id: Option<Uuid>) -> Result<bool, AppError> {
    match id {
        Some(id) => db.individual_exists(id).await,
        None => Ok(false),
    }
}

/// True if the id is given and resolves, or if the natural-key tuple
/// (chromosome, start, ref, alt) already names a variant.
pub async fn variant_exists(
    db: &Database,
    id: Option<Uuid>,
    chromosome: &str,
    start: i64,
    reference: &str,
    alt: &str,
) -> Result<bool, AppError> {
    if let Some(id) = id {
        if db.variant_exists(id).await? {
            return Ok(true);
        }
    }
    db.variant_key_exists(chromosome, start, reference, alt)
        .await
}

/// True if the id is given and resolves, or if the (variant, individual)
/// pair is already called.
pub async fn call_exists(
    db: &Database,
    id: Option<Uuid>,
    variant_id: Uuid,
    individual_id: Uuid,
) -> Result<bool, AppError> {
    if let Some(id) = id {
        if db.call_exists(id).await? {
            return Ok(true);
        }
    }
    db.call_pair_exists(variant_id, individual_id).await
}
