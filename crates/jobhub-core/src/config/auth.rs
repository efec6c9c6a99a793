//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum username length accepted at registration.
    #[serde(default = "default_username_min")]
    pub username_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
            username_min_length: default_username_min(),
        }
    }
}

fn default_password_min() -> usize {
    6
}

fn default_username_min() -> usize {
    3
}
