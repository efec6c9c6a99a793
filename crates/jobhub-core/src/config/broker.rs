//! Job transport (broker + result store) configuration.

use serde::{Deserialize, Serialize};

/// Top-level broker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Broker provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Name of the queue jobs are pushed to and claimed from.
    #[serde(default = "default_queue_name")]
    pub queue_name: String,
    /// How long job records stay in the result store, in seconds.
    #[serde(default = "default_result_ttl")]
    pub result_ttl_seconds: u64,
    /// Redis-specific configuration.
    #[serde(default)]
    pub redis: RedisBrokerConfig,
    /// In-memory configuration.
    #[serde(default)]
    pub memory: MemoryBrokerConfig,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            queue_name: default_queue_name(),
            result_ttl_seconds: default_result_ttl(),
            redis: RedisBrokerConfig::default(),
            memory: MemoryBrokerConfig::default(),
        }
    }
}

/// Redis backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisBrokerConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix prepended to every key the broker touches.
    #[serde(default)]
    pub key_prefix: String,
}

impl Default for RedisBrokerConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: String::new(),
        }
    }
}

/// In-memory backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryBrokerConfig {
    /// Maximum number of session entries retained. Job records are bounded
    /// by their TTL only.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for MemoryBrokerConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_queue_name() -> String {
    "default".to_string()
}

fn default_result_ttl() -> u64 {
    86_400
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_max_capacity() -> u64 {
    100_000
}
