//! # jobhub-api
//!
//! HTTP API layer for JobHub built on Axum.
//!
//! Provides the task submission and polling endpoints, account and session
//! endpoints, middleware (CORS, logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
