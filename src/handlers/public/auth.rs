use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthError;
use crate::database::models::User;
use crate::database::DatabaseError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
}

/// Non-empty string field from the login body
fn credential<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// POST /api/login - Authenticate by username or email and receive a bearer token
///
/// Input: `{"username": "<username or email>", "password": "..."}`
///
/// Output: `{"access_token", "token_type": "bearer", "expires_in", "user"}`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(body) = payload?;

    let (login, password) = match (credential(&body, "username"), credential(&body, "password")) {
        (Some(login), Some(password)) => (login, password),
        _ => return Err(AuthError::MissingCredentials.into()),
    };

    let user = User::find_by_login(&state.pool, login)
        .await
        .map_err(DatabaseError::from)?;

    let user = match user {
        Some(user) if user.verify_password(password, &state.hasher) => user,
        _ => {
            tracing::warn!(login, "Login failed");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let issued = state.tokens.issue(user.id, &user.email)?;
    tracing::info!(user_id = user.id, "Login succeeded");

    Ok(ApiResponse::success(LoginResponse {
        access_token: issued.token,
        token_type: "bearer",
        expires_in: issued.expires_in,
        user,
    }))
}
