//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Server-side session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session identifier.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in minutes.
    #[serde(default = "default_ttl")]
    pub ttl_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_minutes: default_ttl(),
        }
    }
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

fn default_ttl() -> u64 {
    12 * 60
}
