//! Auth handlers: register, login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use jobhub_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MessageResponse};
use crate::extractors::{ValidatedJson, session_id_from_jar};
use crate::state::AppState;

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    state
        .session_manager
        .register(&req.username, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Registration successful! Please login.")),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let session = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;

    let cookie = Cookie::build((
        state.config.session.cookie_name.clone(),
        session.id.to_string(),
    ))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful!".to_string(),
            username: session.username,
        }),
    ))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let cookie_name = state.config.session.cookie_name.clone();

    if let Some(session_id) = session_id_from_jar(&jar, &cookie_name) {
        state.session_manager.logout(session_id).await?;
    }

    Ok((
        jar.remove(Cookie::build((cookie_name, "")).path("/")),
        Json(MessageResponse::new("Logged out successfully")),
    ))
}
