//! Response DTOs.

use serde::{Deserialize, Serialize};

pub use jobhub_entity::user::UserSummary as UserResponse;
pub use jobhub_service::task::{StartTaskResponse, TaskStatusResponse};
pub use jobhub_service::user::DashboardInfo as MeResponse;

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Message text.
    pub message: String,
    /// Authenticated username.
    pub username: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`.
    pub status: String,
    /// Transport reachability, when healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    /// Active transport provider (`memory` or `redis`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Deployment environment, when healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Failure description, when unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
