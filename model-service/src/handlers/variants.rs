use crate::dtos::{
    CreateVariantRequest, IndividualResponse, ReplaceVariantRequest, VariantListParams,
    VariantResponse,
};
use crate::models::VariantFilter;
use crate::services::metrics::{CREATES_REJECTED, ENTITIES_CREATED};
use crate::services::validator;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

pub async fn list_variants(
    State(state): State<AppState>,
    Query(params): Query<VariantListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = VariantFilter {
        chromosome: params.chromosome,
        start: params.start,
        end: params.end,
    };
    let variants = state.db.list_variants(&filter).await?;

    Ok(Json(
        variants
            .into_iter()
            .map(VariantResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_variant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let variant = state
        .db
        .get_variant(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Variant {} not found", id)))?;

    Ok(Json(VariantResponse::from(variant)))
}

pub async fn create_variant(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateVariantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exists = validator::variant_exists(
        &state.db,
        payload.id,
        &payload.chromosome,
        payload.start,
        &payload.reference,
        &payload.alt,
    )
    .await?;

    if exists {
        CREATES_REJECTED.with_label_values(&["variant"]).inc();
        tracing::info!(
            chromosome = %payload.chromosome,
            start = payload.start,
            "Rejecting create for existing variant"
        );
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Variant {}:{} {}>{} already exists",
            payload.chromosome,
            payload.start,
            payload.reference,
            payload.alt
        )));
    }

    let variant = state.db.create_variant(&payload.into()).await?;
    ENTITIES_CREATED.with_label_values(&["variant"]).inc();

    let location = format!("/variants/{}", variant.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(VariantResponse::from(variant)),
    ))
}

pub async fn replace_variant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReplaceVariantRequest>,
) -> Result<StatusCode, AppError> {
    // Client-supplied id/created are dropped in the DTO conversion
    match state.db.update_variant(id, &payload.into()).await? {
        Some(variant) => {
            tracing::info!(variant_id = %variant.id, "Variant replaced");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound(anyhow::anyhow!(
            "Variant {} not found",
            id
        ))),
    }
}

pub async fn delete_variant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.db.delete_variant(id).await? {
        tracing::info!(variant_id = %id, "Variant deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(anyhow::anyhow!(
            "Variant {} not found",
            id
        )))
    }
}

/// GET /variants/{id}/individuals - individuals a variant is called in.
pub async fn list_individuals_by_variant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.variant_exists(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Variant {} not found",
            id
        )));
    }

    let individuals = state.db.individuals_by_variant(id).await?;

    Ok(Json(
        individuals
            .into_iter()
            .map(IndividualResponse::from)
            .collect::<Vec<_>>(),
    ))
}
