//! Typed task definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use jobhub_core::error::AppError;

/// The closed set of task kinds a client may submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Simulated variable-cost data processing.
    ProcessData,
    /// Simulated email delivery.
    SendEmail,
    /// Simulated report generation.
    GenerateReport,
}

impl TaskType {
    /// All task types, in declaration order.
    pub const ALL: [TaskType; 3] = [Self::ProcessData, Self::SendEmail, Self::GenerateReport];

    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProcessData => "process_data",
            Self::SendEmail => "send_email",
            Self::GenerateReport => "generate_report",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::invalid_task_type(s))
    }
}

/// A task together with its typed payload.
///
/// Serialized with an internal `task_type` tag so queue messages stay
/// self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task_type", rename_all = "snake_case")]
pub enum Task {
    /// Process an arbitrary JSON document on behalf of a user.
    ProcessData {
        /// Requesting user.
        user_id: String,
        /// Input document.
        data: serde_json::Value,
    },
    /// Send an email.
    SendEmail {
        /// Recipient address.
        email: String,
        /// Subject line.
        subject: String,
        /// Body text.
        message: String,
    },
    /// Generate the monthly report for a user.
    GenerateReport {
        /// Requesting user.
        user_id: String,
    },
}

impl Task {
    /// The kind of this task.
    pub fn task_type(&self) -> TaskType {
        match self {
            Self::ProcessData { .. } => TaskType::ProcessData,
            Self::SendEmail { .. } => TaskType::SendEmail,
            Self::GenerateReport { .. } => TaskType::GenerateReport,
        }
    }
}
