//! Background job domain entities.

pub mod model;
pub mod state;
pub mod task;

pub use model::{JobMessage, JobRecord};
pub use state::JobState;
pub use task::{Task, TaskType};
