//! # jobhub-service
//!
//! Business logic service layer for JobHub. Each service receives a
//! [`RequestContext`] proving the caller is authenticated and orchestrates
//! the job queue or the credential store to implement one use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod task;
pub mod user;

pub use context::RequestContext;
pub use task::{TaskDispatcher, TaskStatusReporter};
pub use user::UserService;
