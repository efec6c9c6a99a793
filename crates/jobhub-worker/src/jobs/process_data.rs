//! Simulated variable-cost data processing.

use std::time::Duration;

use rand::Rng;
use serde_json::{Value, json};

use crate::executor::JobExecutionError;

/// Inclusive range of work units a processing job takes.
const UNITS: std::ops::RangeInclusive<u64> = 3..=10;

/// Process `data` for `user_id`, taking a random number of time units.
pub async fn run(user_id: &str, data: &Value, unit: Duration) -> Result<Value, JobExecutionError> {
    // Drawn before the await: the thread-local generator is not `Send`.
    let processing_time = rand::rng().random_range(UNITS);
    tracing::info!(user_id, processing_time, "Starting data processing");

    tokio::time::sleep(super::work_time(unit, processing_time as u32)).await;

    tracing::info!(user_id, processing_time, "Data processing completed");
    Ok(json!({
        "user_id": user_id,
        "data": data,
        "processing_time": processing_time,
        "status": "completed",
    }))
}
