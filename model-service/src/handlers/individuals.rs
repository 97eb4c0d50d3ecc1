use crate::dtos::{
    CreateIndividualRequest, IndividualResponse, ReplaceIndividualRequest, VariantResponse,
};
use crate::services::metrics::{CREATES_REJECTED, ENTITIES_CREATED};
use crate::services::validator;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

pub async fn list_individuals(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let individuals = state.db.list_individuals().await?;

    Ok(Json(
        individuals
            .into_iter()
            .map(IndividualResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_individual(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let individual = state
        .db
        .get_individual(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Individual {} not found", id)))?;

    Ok(Json(IndividualResponse::from(individual)))
}

pub async fn create_individual(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateIndividualRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(id) = payload.id {
        if validator::individual_exists(&state.db, Some(id)).await? {
            CREATES_REJECTED.with_label_values(&["individual"]).inc();
            tracing::info!(individual_id = %id, "Rejecting create for existing individual");
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Individual {} already exists",
                id
            )));
        }
    }

    let individual = state.db.create_individual(&payload.into()).await?;
    ENTITIES_CREATED.with_label_values(&["individual"]).inc();

    let location = format!("/individuals/{}", individual.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(IndividualResponse::from(individual)),
    ))
}

pub async fn replace_individual(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReplaceIndividualRequest>,
) -> Result<StatusCode, AppError> {
    // Client-supplied id/created are dropped in the DTO conversion
    match state.db.update_individual(id, &payload.into()).await? {
        Some(individual) => {
            tracing::info!(individual_id = %individual.id, "Individual replaced");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound(anyhow::anyhow!(
            "Individual {} not found",
            id
        ))),
    }
}

pub async fn delete_individual(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.db.delete_individual(id).await? {
        tracing::info!(individual_id = %id, "Individual deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(anyhow::anyhow!(
            "Individual {} not found",
            id
        )))
    }
}

/// GET /individuals/{id}/variants - variants called in an individual.
pub async fn list_variants_by_individual(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.individual_exists(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Individual {} not found",
            id
        )));
    }

    let variants = state.db.variants_by_individual(id).await?;

    Ok(Json(
        variants
            .into_iter()
            .map(VariantResponse::from)
            .collect::<Vec<_>>(),
    ))
}
