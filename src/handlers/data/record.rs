use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use super::to_value;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::with_model;

/// GET /api/:model/:id - Get a single record by id
pub async fn get(State(state): State<AppState>, Path((model, id)): Path<(String, i64)>) -> ApiResult<Value> {
    let kind = state.registry.resolve(&model)?;
    let repository = state.repository();

    let data = with_model!(kind, M => to_value(repository.select_404::<M>(id).await?))?;
    Ok(ApiResponse::success(data))
}

/// PUT /api/:model/:id - Overwrite the fields named in the body
pub async fn put(
    State(state): State<AppState>,
    Path((model, id)): Path<(String, i64)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let kind = state.registry.resolve(&model)?;
    let Json(body) = payload?;
    let repository = state.repository();

    let data = with_model!(kind, M => to_value(repository.update::<M>(id, body).await?))?;
    Ok(ApiResponse::success(data))
}

/// DELETE /api/:model/:id - Delete a record by id
pub async fn delete(State(state): State<AppState>, Path((model, id)): Path<(String, i64)>) -> ApiResult<Value> {
    let kind = state.registry.resolve(&model)?;
    let repository = state.repository();

    let deleted = with_model!(kind, M => repository.delete::<M>(id).await?);
    tracing::info!(model = %kind, id = deleted, "Deleted record");
    Ok(ApiResponse::success(json!({ "deleted": deleted })))
}
