//! Signed-in user views.

use axum::Json;
use axum::extract::State;

use jobhub_core::error::AppError;

use crate::dto::response::{MeResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    Ok(Json(state.user_service.dashboard(auth.context()).await?))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    Ok(Json(state.user_service.list_users(auth.context()).await?))
}
