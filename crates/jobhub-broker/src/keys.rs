//! Key builders for every queue and result-store entry JobHub uses.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use std::fmt::Display;

/// Prefix applied to all JobHub keys.
const PREFIX: &str = "jobhub";

/// Key of the list backing a named job queue.
pub fn queue(name: &str) -> String {
    format!("{PREFIX}:queue:{name}")
}

/// Key of the stored record for a job.
pub fn task_meta(job_id: impl Display) -> String {
    format!("{PREFIX}:task-meta:{job_id}")
}

/// Whether `key` holds a job record.
pub fn is_task_meta(key: &str) -> bool {
    key.strip_prefix(PREFIX)
        .is_some_and(|rest| rest.starts_with(":task-meta:"))
}

/// Key of a login session.
pub fn session(session_id: impl Display) -> String {
    format!("{PREFIX}:session:{session_id}")
}
