//! Server-side session lifecycle: register, login, validate, logout.

pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::SessionStore;
