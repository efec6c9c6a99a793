//! Session lifecycle manager: registration, login and logout flows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use jobhub_core::config::{AuthConfig, SessionConfig};
use jobhub_core::error::AppError;
use jobhub_core::result::AppResult;
use jobhub_core::types::id::SessionId;
use jobhub_entity::session::Session;
use jobhub_entity::user::UserSummary;

use crate::credentials::CredentialStore;
use crate::password::PasswordValidator;

use super::store::SessionStore;

/// Coordinates the credential store and the session store.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Registered users.
    credentials: Arc<dyn CredentialStore>,
    /// Session persistence.
    sessions: SessionStore,
    /// Registration policy.
    validator: PasswordValidator,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: SessionStore,
        auth_config: &AuthConfig,
    ) -> Self {
        Self {
            credentials,
            sessions,
            validator: PasswordValidator::new(auth_config),
        }
    }

    /// Builds a manager whose sessions live in the given broker.
    pub fn with_broker(
        credentials: Arc<dyn CredentialStore>,
        broker: jobhub_broker::BrokerManager,
        auth_config: &AuthConfig,
        session_config: &SessionConfig,
    ) -> Self {
        Self::new(
            credentials,
            SessionStore::new(broker, session_config),
            auth_config,
        )
    }

    /// The credential store.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Registers a new user after applying the credential policy.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<UserSummary> {
        let username = username.trim();
        self.validator.validate_username(username)?;
        self.validator.validate(password)?;
        self.credentials.create(username, password).await
    }

    /// Verifies credentials and opens a new session.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let username = username.trim();
        if !self.credentials.verify(username, password).await? {
            warn!(username, "Failed login attempt");
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.sessions.ttl())
            .map_err(|e| AppError::configuration(format!("Invalid session TTL: {e}")))?;
        let session = Session {
            id: SessionId::new(),
            username: username.to_string(),
            created_at: now,
            expires_at: now + ttl,
        };
        self.sessions.set(&session).await?;

        info!(username, session_id = %session.id, "User logged in");
        Ok(session)
    }

    /// Resolves a session id to a live session.
    pub async fn validate(&self, session_id: SessionId) -> AppResult<Session> {
        self.sessions
            .get(session_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Not logged in"))
    }

    /// Ends a session. Unknown ids are ignored.
    pub async fn logout(&self, session_id: SessionId) -> AppResult<()> {
        self.sessions.clear(session_id).await?;
        info!(session_id = %session_id, "User logged out");
        Ok(())
    }
}
