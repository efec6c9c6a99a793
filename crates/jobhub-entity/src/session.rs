//! Login session entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobhub_core::types::id::SessionId;

/// A server-side login session, stored in the broker's key-value space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier carried by the client cookie.
    pub id: SessionId,
    /// Authenticated username.
    pub username: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
