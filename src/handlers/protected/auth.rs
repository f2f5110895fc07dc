use axum::extract::{Extension, State};
use serde_json::{json, Value};

use crate::database::models::User;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/me - the user behind the bearer token
pub async fn me(State(state): State<AppState>, Extension(auth): Extension<AuthUser>) -> ApiResult<User> {
    match state.repository().select_404::<User>(auth.user_id).await {
        Ok(user) => Ok(ApiResponse::success(user)),
        Err(DatabaseError::NotFound(_)) => Err(ApiError::not_found("User not found")),
        Err(e) => Err(e.into()),
    }
}

/// POST /api/logout - Acknowledge logout
///
/// Tokens are stateless, so nothing is revoked here: the token keeps working
/// until it expires and the client is expected to discard it.
pub async fn logout(Extension(auth): Extension<AuthUser>) -> ApiResult<Value> {
    tracing::info!(user_id = auth.user_id, "Logout");
    Ok(ApiResponse::success(json!({ "message": "Logged out successfully" })))
}
