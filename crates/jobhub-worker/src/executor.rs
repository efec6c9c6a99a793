//! The handler seam between the worker runner and task implementations.

use async_trait::async_trait;
use serde_json::Value;

use jobhub_core::error::AppError;
use jobhub_entity::job::JobMessage;

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug + 'static {
    /// Execute the job and return its result document
    async fn execute(&self, message: &JobMessage) -> Result<Value, JobExecutionError>;
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// The job cannot succeed with this input
    #[error("Permanent job failure: {0}")]
    Permanent(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

impl JobExecutionError {
    /// Text stored in the job record's `error` field.
    pub fn failure_message(&self) -> String {
        match self {
            Self::Permanent(msg) => msg.clone(),
            Self::Internal(err) => err.message.clone(),
        }
    }
}
