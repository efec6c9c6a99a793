//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user as held by the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique login name.
    pub username: String,
    /// Argon2id PHC string. Never serialized into API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

/// Public view of a user for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Login name.
    pub username: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}
