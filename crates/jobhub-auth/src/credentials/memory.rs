//! In-process credential store backed by a concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

use jobhub_core::error::AppError;
use jobhub_core::result::AppResult;
use jobhub_entity::user::{User, UserSummary};

use crate::password::PasswordHasher;

use super::store::CredentialStore;

/// Credential store holding users in memory, hashing with Argon2id.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<DashMap<String, User>>,
    hasher: PasswordHasher,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Argon2 is CPU-bound; keep it off the async workers.
    async fn hash(&self, password: &str) -> AppResult<String> {
        let hasher = self.hasher;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> AppResult<bool> {
        let Some(hash) = self.users.get(username).map(|u| u.password_hash.clone()) else {
            return Ok(false);
        };
        let hasher = self.hasher;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }

    async fn exists(&self, username: &str) -> AppResult<bool> {
        Ok(self.users.contains_key(username))
    }

    async fn create(&self, username: &str, password: &str) -> AppResult<UserSummary> {
        if self.users.contains_key(username) {
            return Err(AppError::conflict("Username already exists"));
        }
        let password_hash = self.hash(password).await?;

        // Re-checked under the shard lock: two registrations may race past the check above.
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AppError::conflict("Username already exists")),
            Entry::Vacant(slot) => {
                let user = User {
                    username: username.to_string(),
                    password_hash,
                    created_at: Utc::now(),
                };
                let summary = UserSummary::from(&user);
                slot.insert(user);
                info!(username, "Registered user");
                Ok(summary)
            }
        }
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn list(&self) -> AppResult<Vec<UserSummary>> {
        let mut users: Vec<UserSummary> = self
            .users
            .iter()
            .map(|entry| UserSummary::from(entry.value()))
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}
