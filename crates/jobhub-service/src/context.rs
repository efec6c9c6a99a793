//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobhub_core::types::id::SessionId;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from a validated session and passed into service
/// methods, so every operation knows *who* is acting and from *which*
/// session. Holding one is the proof of authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The current session ID.
    pub session_id: SessionId,
    /// The authenticated username.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(session_id: SessionId, username: impl Into<String>) -> Self {
        Self {
            session_id,
            username: username.into(),
            request_time: Utc::now(),
        }
    }
}
