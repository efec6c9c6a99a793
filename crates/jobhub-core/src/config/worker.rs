//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background job worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the embedded worker pool is started.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of independent workers claiming jobs.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// How long a worker blocks waiting for a job before re-checking shutdown.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Length of one simulated work unit in milliseconds.
    #[serde(default = "default_time_unit")]
    pub time_unit_millis: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            concurrency: default_concurrency(),
            poll_interval_seconds: default_poll_interval(),
            time_unit_millis: default_time_unit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    4
}

fn default_poll_interval() -> u64 {
    1
}

fn default_time_unit() -> u64 {
    1000
}
