//! User queries for authenticated callers.

pub mod service;

pub use service::{DashboardInfo, UserService};
