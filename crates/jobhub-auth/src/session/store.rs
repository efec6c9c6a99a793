//! Session persistence in the broker's key-value store.

use std::time::Duration;

use tracing::debug;

use jobhub_broker::BrokerManager;
use jobhub_broker::keys;
use jobhub_core::config::SessionConfig;
use jobhub_core::result::AppResult;
use jobhub_core::traits::broker::BrokerProvider;
use jobhub_core::types::id::SessionId;
use jobhub_entity::session::Session;

/// Reads and writes session records keyed by session id.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Transport whose key-value side holds sessions.
    broker: BrokerManager,
    /// Lifetime of a freshly written session.
    ttl: Duration,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(broker: BrokerManager, config: &SessionConfig) -> Self {
        Self {
            broker,
            ttl: Duration::from_secs(config.ttl_minutes * 60),
        }
    }

    /// Lifetime applied to new sessions.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Loads a session. Expired sessions read as absent.
    pub async fn get(&self, id: SessionId) -> AppResult<Option<Session>> {
        let session: Option<Session> = self.broker.get_json(&keys::session(id)).await?;
        Ok(session.filter(|s| !s.is_expired()))
    }

    /// Stores a session until its expiry.
    pub async fn set(&self, session: &Session) -> AppResult<()> {
        self.broker
            .set_json(&keys::session(session.id), session, self.ttl)
            .await
    }

    /// Removes a session.
    pub async fn clear(&self, id: SessionId) -> AppResult<()> {
        debug!(session_id = %id, "Clearing session");
        self.broker.delete(&keys::session(id)).await
    }
}
