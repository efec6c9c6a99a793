//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use jobhub_core::error::AppError;
use jobhub_core::result::AppResult;
use jobhub_core::traits::broker::BrokerProvider;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match check_broker(&state).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                broker: Some("connected".to_string()),
                provider: Some(state.broker.kind().to_string()),
                environment: Some(state.config.server.environment.clone()),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, provider = state.broker.kind(), "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    broker: None,
                    provider: Some(state.broker.kind().to_string()),
                    environment: None,
                    error: Some(e.message),
                }),
            )
        }
    }
}

async fn check_broker(state: &AppState) -> AppResult<()> {
    if state.broker.health_check().await? {
        Ok(())
    } else {
        Err(AppError::service_unavailable("Broker health check failed"))
    }
}
