//! Simulated email delivery.

use std::time::Duration;

use serde_json::{Value, json};

use crate::executor::JobExecutionError;

/// Work units an email send takes.
const UNITS: u32 = 2;

/// Send `message` to `email`.
pub async fn run(
    email: &str,
    subject: &str,
    _message: &str,
    unit: Duration,
) -> Result<Value, JobExecutionError> {
    if !email.contains('@') {
        return Err(JobExecutionError::Permanent(format!(
            "Invalid email address: {email}"
        )));
    }

    tracing::info!(email, subject, "Sending email");
    tokio::time::sleep(super::work_time(unit, UNITS)).await;
    tracing::info!(email, "Email sent");

    Ok(json!({ "email": email, "status": "sent" }))
}
