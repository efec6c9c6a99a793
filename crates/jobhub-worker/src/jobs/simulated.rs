//! Dispatches each task variant to its simulated implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use jobhub_core::config::WorkerConfig;
use jobhub_entity::job::{JobMessage, Task};

use crate::executor::{JobExecutionError, JobHandler};

use super::{generate_report, process_data, send_email};

/// Handler running the three built-in simulated tasks.
#[derive(Debug, Clone)]
pub struct SimulatedTaskHandler {
    /// Length of one unit of simulated work.
    time_unit: Duration,
}

impl SimulatedTaskHandler {
    /// Create a handler with an explicit time unit.
    pub fn new(time_unit: Duration) -> Self {
        Self { time_unit }
    }

    /// Create a handler from worker configuration.
    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new(Duration::from_millis(config.time_unit_millis))
    }
}

#[async_trait]
impl JobHandler for SimulatedTaskHandler {
    async fn execute(&self, message: &JobMessage) -> Result<Value, JobExecutionError> {
        match &message.task {
            Task::ProcessData { user_id, data } => {
                process_data::run(user_id, data, self.time_unit).await
            }
            Task::SendEmail {
                email,
                subject,
                message,
            } => send_email::run(email, subject, message, self.time_unit).await,
            Task::GenerateReport { user_id } => generate_report::run(user_id, self.time_unit).await,
        }
    }
}
