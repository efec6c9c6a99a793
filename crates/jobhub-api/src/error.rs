//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl lives next to `AppError` in `jobhub-core` (orphan rule).

#[cfg(test)]
use axum::http::StatusCode;
#[cfg(test)]
use axum::response::IntoResponse;

#[cfg(test)]
use jobhub_core::error::{AppError, ErrorKind};

pub use jobhub_core::error::{ApiErrorResponse, status_for};
