//! Job queue message and result-store record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use jobhub_core::types::id::JobId;

use super::state::JobState;
use super::task::{Task, TaskType};

/// A job as it travels on the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMessage {
    /// Correlation key shared with the result record.
    pub id: JobId,
    /// The task to run, with its payload.
    pub task: Task,
    /// Username of the submitting session.
    pub submitted_by: String,
    /// When the dispatcher enqueued the job.
    pub enqueued_at: DateTime<Utc>,
}

impl JobMessage {
    /// Create a message for a freshly issued job id.
    pub fn new(task: Task, submitted_by: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            task,
            submitted_by: submitted_by.into(),
            enqueued_at: Utc::now(),
        }
    }
}

/// A job's state as persisted in the result store, keyed by job id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Job identifier.
    pub id: JobId,
    /// Task kind; fixed for the lifetime of the id.
    pub task_type: TaskType,
    /// Current state.
    pub state: JobState,
    /// Task output, present only in `SUCCESS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure description, present only in `FAILURE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Worker that claimed the job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    /// When the record was created (enqueue time).
    pub created_at: DateTime<Utc>,
    /// When a worker claimed the job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// When the job reached a terminal state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    /// The initial record written when a message is enqueued.
    pub fn pending(message: &JobMessage) -> Self {
        Self {
            id: message.id,
            task_type: message.task.task_type(),
            state: JobState::Pending,
            result: None,
            error: None,
            worker_id: None,
            created_at: message.enqueued_at,
            started_at: None,
            completed_at: None,
        }
    }

    /// This record moved to `STARTED` by the given worker.
    pub fn started(mut self, worker_id: &str) -> Self {
        self.state = JobState::Started;
        self.worker_id = Some(worker_id.to_string());
        self.started_at = Some(Utc::now());
        self
    }

    /// This record moved to `SUCCESS` with its result.
    pub fn succeeded(mut self, result: Value) -> Self {
        self.state = JobState::Success;
        self.result = Some(result);
        self.error = None;
        self.completed_at = Some(Utc::now());
        self
    }

    /// This record moved to `FAILURE` with an error description.
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.state = JobState::Failure;
        self.result = None;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
        self
    }

    /// Best-effort string form of whatever extra information the record holds.
    pub fn info(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }
        match &self.result {
            Some(Value::String(s)) => s.clone(),
            Some(value) => value.to_string(),
            None => self.state.to_string(),
        }
    }
}
