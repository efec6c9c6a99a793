//! Simulated report generation.

use std::time::Duration;

use serde_json::{Value, json};

use crate::executor::JobExecutionError;

const UNITS: u32 = 5;
const REPORT_NAME: &str = "monthly_report.pdf";

/// Generate the monthly report for `user_id`.
pub async fn run(user_id: &str, unit: Duration) -> Result<Value, JobExecutionError> {
    tracing::info!(user_id, "Generating report");
    tokio::time::sleep(super::work_time(unit, UNITS)).await;
    tracing::info!(user_id, report = REPORT_NAME, "Report generated");

    Ok(json!({ "user_id": user_id, "report": REPORT_NAME }))
}
