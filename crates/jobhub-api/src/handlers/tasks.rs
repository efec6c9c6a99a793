//! Task handlers: submit a background job and poll its status.

use axum::Json;
use axum::extract::{Path, State};

use jobhub_core::error::AppError;

use crate::dto::request::StartTaskRequest;
use crate::dto::response::{StartTaskResponse, TaskStatusResponse};
use crate::extractors::{AuthUser, JsonOrDefault};
use crate::state::AppState;

/// POST /start-task
pub async fn start_task(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonOrDefault(req): JsonOrDefault<StartTaskRequest>,
) -> Result<Json<StartTaskResponse>, AppError> {
    let resp = state.dispatcher.start_task(auth.context(), req).await?;
    Ok(Json(resp))
}

/// GET /task-status/{task_id}
pub async fn task_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<String>,
) -> Result<Json<TaskStatusResponse>, AppError> {
    let status = state.reporter.task_status(auth.context(), &task_id).await?;
    Ok(Json(status))
}
