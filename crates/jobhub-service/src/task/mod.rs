//! Job submission and status reporting.

pub mod dispatcher;
pub mod reporter;

pub use dispatcher::{StartTaskRequest, StartTaskResponse, TaskDispatcher};
pub use reporter::{TaskStatusReporter, TaskStatusResponse};
