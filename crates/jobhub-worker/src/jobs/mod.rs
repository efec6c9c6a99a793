//! Built-in job handler implementations.

pub mod generate_report;
pub mod process_data;
pub mod send_email;
pub mod simulated;

pub use simulated::SimulatedTaskHandler;

use std::time::Duration;

/// Length of `units` units of simulated work. Saturates for huge time units.
pub(crate) fn work_time(unit: Duration, units: u32) -> Duration {
    unit.saturating_mul(units)
}
