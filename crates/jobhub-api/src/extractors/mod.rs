//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, session_id_from_jar};
pub use json::{JsonOrDefault, ValidatedJson};
