//! Turns a validated task request into an enqueued job.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use jobhub_core::result::AppResult;
use jobhub_core::types::id::JobId;
use jobhub_entity::job::{JobMessage, Task, TaskType};
use jobhub_worker::JobQueue;

use crate::context::RequestContext;

/// Body of a task submission. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartTaskRequest {
    /// Task type wire name; `process_data` when absent.
    pub task_type: Option<String>,
    /// Input document for `process_data`.
    pub data: Option<Value>,
    /// Recipient for `send_email`.
    pub email: Option<String>,
    /// Subject for `send_email`.
    pub subject: Option<String>,
    /// Body for `send_email`.
    pub message: Option<String>,
}

/// Acknowledgement of an accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTaskResponse {
    /// Identifier to poll with.
    pub task_id: JobId,
    /// Always `"started"`.
    pub status: String,
    /// `"<task_type> started in background"`.
    pub message: String,
}

/// Validates task requests and enqueues jobs.
#[derive(Debug, Clone)]
pub struct TaskDispatcher {
    queue: Arc<JobQueue>,
}

impl TaskDispatcher {
    /// Creates a new dispatcher.
    pub fn new(queue: Arc<JobQueue>) -> Self {
        Self { queue }
    }

    /// Enqueue the requested task on behalf of the session user.
    ///
    /// Nothing is enqueued when the task type is not recognized.
    pub async fn start_task(
        &self,
        ctx: &RequestContext,
        req: StartTaskRequest,
    ) -> AppResult<StartTaskResponse> {
        let task_type: TaskType = req
            .task_type
            .as_deref()
            .unwrap_or(TaskType::ProcessData.as_str())
            .parse()?;
        let task = build_task(ctx, task_type, req);

        let message = JobMessage::new(task, ctx.username.clone());
        self.queue.enqueue(&message).await?;

        info!(
            job_id = %message.id,
            task_type = %task_type,
            username = %ctx.username,
            "Task started"
        );

        Ok(StartTaskResponse {
            task_id: message.id,
            status: "started".to_string(),
            message: format!("{task_type} started in background"),
        })
    }
}

/// Fill the payload, deriving defaults from the session user.
fn build_task(ctx: &RequestContext, task_type: TaskType, req: StartTaskRequest) -> Task {
    let username = &ctx.username;
    match task_type {
        TaskType::ProcessData => Task::ProcessData {
            user_id: username.clone(),
            data: req.data.unwrap_or_else(|| json!({"sample": "data"})),
        },
        TaskType::SendEmail => Task::SendEmail {
            email: req.email.unwrap_or_else(|| format!("{username}@example.com")),
            subject: req.subject.unwrap_or_else(|| "Hello".to_string()),
            message: req.message.unwrap_or_else(|| "Test message".to_string()),
        },
        TaskType::GenerateReport => Task::GenerateReport {
            user_id: username.clone(),
        },
    }
}
