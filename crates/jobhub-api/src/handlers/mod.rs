//! HTTP request handlers, grouped by domain.

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;
