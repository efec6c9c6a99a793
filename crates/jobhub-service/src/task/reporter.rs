//! Maps stored job records into the status payload clients poll.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use jobhub_core::error::AppError;
use jobhub_core::result::AppResult;
use jobhub_core::types::id::JobId;
use jobhub_entity::job::{JobRecord, JobState};
use jobhub_worker::JobQueue;

use crate::context::RequestContext;

/// Status payload for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    /// Raw state name.
    pub state: JobState,
    /// Human-readable status line.
    pub status: String,
    /// Task output, on success only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure description, on failure only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<JobRecord> for TaskStatusResponse {
    fn from(record: JobRecord) -> Self {
        let state = record.state;
        match state {
            JobState::Pending => Self::message(state, "Task is waiting to be processed..."),
            JobState::Started => Self::message(state, "Task is being processed..."),
            JobState::Success => Self {
                state,
                status: "Task completed!".to_string(),
                result: Some(record.result.unwrap_or(Value::Null)),
                error: None,
            },
            JobState::Failure => Self {
                state,
                status: "Task failed".to_string(),
                result: None,
                error: Some(record.info()),
            },
            JobState::Unknown => Self::message(state, &record.info()),
        }
    }
}

impl TaskStatusResponse {
    fn message(state: JobState, status: &str) -> Self {
        Self {
            state,
            status: status.to_string(),
            result: None,
            error: None,
        }
    }
}

/// Reads job state for authenticated callers.
#[derive(Debug, Clone)]
pub struct TaskStatusReporter {
    queue: Arc<JobQueue>,
}

impl TaskStatusReporter {
    /// Creates a new reporter.
    pub fn new(queue: Arc<JobQueue>) -> Self {
        Self { queue }
    }

    /// Report the state of `task_id`.
    ///
    /// Ids that are malformed or have no record are `NotFound`, which keeps
    /// them distinct from jobs that are merely pending.
    pub async fn task_status(
        &self,
        ctx: &RequestContext,
        task_id: &str,
    ) -> AppResult<TaskStatusResponse> {
        let id: JobId = task_id
            .parse()
            .map_err(|_| AppError::not_found("Unknown task id"))?;

        let record = self
            .queue
            .get_record(id)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown task id"))?;

        debug!(job_id = %id, state = %record.state, username = %ctx.username, "Task status polled");
        Ok(record.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobhub_broker::BrokerManager;
    use jobhub_core::config::BrokerConfig;
    use jobhub_core::error::ErrorKind;
    use jobhub_core::types::id::SessionId;
    use jobhub_entity::job::{JobMessage, Task};
    use serde_json::json;

    async fn setup() -> (TaskStatusReporter, Arc<JobQueue>) {
        let config = BrokerConfig::default();
        let broker = BrokerManager::new(&config).await.unwrap();
        let queue = Arc::new(JobQueue::new(broker, &config));
        (TaskStatusReporter::new(queue.clone()), queue)
    }

    fn ctx() -> RequestContext {
        RequestContext::new(SessionId::new(), "alice")
    }

    fn message() -> JobMessage {
        JobMessage::new(
            Task::GenerateReport {
                user_id: "alice".to_string(),
            },
            "alice",
        )
    }

    #[tokio::test]
    async fn test_state_payloads() {
        let (reporter, queue) = setup().await;
        let msg = message();
        let id = msg.id.to_string();
        queue.enqueue(&msg).await.unwrap();

        let status = reporter.task_status(&ctx(), &id).await.unwrap();
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"state": "PENDING", "status": "Task is waiting to be processed..."})
        );

        queue.mark_started(&msg, "w-1").await.unwrap();
        let status = reporter.task_status(&ctx(), &id).await.unwrap();
        assert_eq!(status.status, "Task is being processed...");

        let result = json!({"user_id": "alice", "report": "monthly_report.pdf"});
        queue.complete(&msg, result.clone()).await.unwrap();
        let status = reporter.task_status(&ctx(), &id).await.unwrap();
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"state": "SUCCESS", "status": "Task completed!", "result": result})
        );
    }

    #[tokio::test]
    async fn test_failure_payload() {
        let (reporter, queue) = setup().await;
        let msg = message();
        queue.enqueue(&msg).await.unwrap();
        queue.mark_started(&msg, "w-1").await.unwrap();
        queue.fail(&msg, "boom").await.unwrap();

        let status = reporter
            .task_status(&ctx(), &msg.id.to_string())
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"state": "FAILURE", "status": "Task failed", "error": "boom"})
        );
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let (reporter, _queue) = setup().await;
        let err = reporter
            .task_status(&ctx(), &JobId::new().to_string())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = reporter.task_status(&ctx(), "not-a-uuid").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Unknown task id");
    }

    #[test]
    fn test_foreign_state_reports_info() {
        let mut record = JobRecord::pending(&message());
        record.state = JobState::Unknown;
        let status = TaskStatusResponse::from(record);
        assert_eq!(status.state, JobState::Unknown);
        assert_eq!(status.status, "UNKNOWN");
    }
}
