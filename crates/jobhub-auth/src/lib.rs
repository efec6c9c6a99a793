//! # jobhub-auth
//!
//! Authentication and session management for JobHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and credential policy
//! - `credentials`: the credential store collaborator and its in-memory implementation
//! - `session`: server-side login sessions kept in the broker's key-value store

pub mod credentials;
pub mod password;
pub mod session;

pub use credentials::{CredentialStore, MemoryCredentialStore};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{SessionManager, SessionStore};
