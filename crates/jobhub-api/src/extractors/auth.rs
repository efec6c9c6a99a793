//! `AuthUser` extractor: reads the session cookie, validates the session, and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use jobhub_core::error::AppError;
use jobhub_core::types::id::SessionId;
use jobhub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// Rejects with `401 {"error": "Not logged in"}` before any body is read.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Session id carried by the request's session cookie, if well-formed.
pub fn session_id_from_jar(jar: &CookieJar, cookie_name: &str) -> Option<SessionId> {
    jar.get(cookie_name)
        .and_then(|cookie| cookie.value().parse().ok())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = session_id_from_jar(&jar, &state.config.session.cookie_name)
            .ok_or_else(|| AppError::unauthorized("Not logged in"))?;

        let session = state.session_manager.validate(session_id).await?;

        Ok(AuthUser(RequestContext::new(session.id, session.username)))
    }
}
