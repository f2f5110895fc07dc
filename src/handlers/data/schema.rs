use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use super::to_value;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::with_model;

/// GET /api/:model - List every record of the model
pub async fn get(State(state): State<AppState>, Path(model): Path<String>) -> ApiResult<Value> {
    let kind = state.registry.resolve(&model)?;
    let repository = state.repository();

    let data = with_model!(kind, M => to_value(repository.select_all::<M>().await?))?;
    Ok(ApiResponse::success(data))
}

/// POST /api/:model - Create one record from a flat field map
pub async fn post(
    State(state): State<AppState>,
    Path(model): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let kind = state.registry.resolve(&model)?;
    let Json(body) = payload?;
    let repository = state.repository();

    let data = with_model!(kind, M => to_value(repository.create::<M>(body).await?))?;
    tracing::info!(model = %kind, "Created record");
    Ok(ApiResponse::created(data))
}
