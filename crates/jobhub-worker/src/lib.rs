//! Background job processing for JobHub.
//!
//! This crate provides:
//! - A job queue that pairs the broker's queue with the result store and
//!   guards every state write against regressions
//! - The `JobHandler` seam and its execution error type
//! - The simulated task handlers
//! - A worker runner that drives a pool of independent workers

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;

pub use executor::{JobExecutionError, JobHandler};
pub use jobs::SimulatedTaskHandler;
pub use queue::JobQueue;
pub use runner::WorkerRunner;
