//! # jobhub-entity
//!
//! Domain entities shared by the dispatcher, the worker pool, and the API:
//! jobs (typed tasks, states, queue messages, stored records), users, and
//! login sessions.

pub mod job;
pub mod session;
pub mod user;
