use crate::dtos::{CallResponse, CreateCallRequest, ReplaceCallRequest};
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

pub async fn list_calls(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let calls = state.db.list_calls().await?;

    Ok(Json(
        calls.into_iter().map(CallResponse::from).collect::<Vec<_>>(),
    ))
}

pub async fn get_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let call = state
        .db
        .get_call(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Call {} not found", id)))?;

    Ok(Json(CallResponse::from(call)))
}

pub async fn create_call(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCallRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exists = validator::call_exists(
        &state.db,
        payload.id,
        payload.variant_id,
        payload.individual_id,
    )
    .await?;

    if exists {
        CREATES_REJECTED.with_label_values(&["call"]).inc();
        tracing::info!(
            variant_id = %payload.variant_id,
            individual_id = %payload.individual_id,
            "Rejecting create for existing call"
        );
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Call for variant {} and individual {} already exists",
            payload.variant_id,
            payload.individual_id
        )));
    }

    let call = state.db.create_call(&payload.into()).await?;
    ENTITIES_CREATED.with_label_values(&["call"]).inc();

    let location = format!("/calls/{}", call.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CallResponse::from(call)),
    ))
}

pub async fn replace_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReplaceCallRequest>,
) -> Result<StatusCode, AppError> {
    // Client-supplied id/created are dropped in the DTO conversion
    match state.db.update_call(id, &payload.into()).await? {
        Some(call) => {
            tracing::info!(call_id = %call.id, "Call replaced");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound(anyhow::anyhow!("Call {} not found", id))),
    }
}

pub async fn delete_call(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.db.delete_call(id).await? {
        tracing::info!(call_id = %id, "Call deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(anyhow::anyhow!("Call {} not found", id)))
    }
}
