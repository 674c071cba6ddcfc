use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::IntoResponse,
};
use plates::{NewPlate, Plate, PlateDraft};
use serde_json::json;
use tracing::info;

use crate::{error::AppError, state::State, utils::validate_draft};

pub async fn list_handler(AxumState(state): AxumState<Arc<State>>) -> Json<Vec<Plate>> {
    Json(state.store.list().await)
}

pub async fn create_handler(
    AxumState(state): AxumState<Arc<State>>,
    Json(payload): Json<NewPlate>,
) -> Result<impl IntoResponse, AppError> {
    validate_draft(&payload.draft)?;

    let plate = state.store.insert(payload).await?;
    info!("Created plate {} ({})", plate.id, plate.name);

    Ok((StatusCode::CREATED, Json(plate)))
}

pub async fn update_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(id): Path<u64>,
    Json(payload): Json<PlateDraft>,
) -> Result<Json<Plate>, AppError> {
    validate_draft(&payload)?;

    let plate = state
        .store
        .update(id, payload)
        .await
        .ok_or(AppError::NotFound(id))?;
    info!("Updated plate {id}");

    Ok(Json(plate))
}

pub async fn delete_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    state.store.remove(id).await.ok_or(AppError::NotFound(id))?;
    info!("Deleted plate {id}");

    Ok((StatusCode::OK, Json(json!({}))))
}
