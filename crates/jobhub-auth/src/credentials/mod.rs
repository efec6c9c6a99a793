//! Credential storage.

pub mod memory;
pub mod store;

pub use memory::MemoryCredentialStore;
pub use store::CredentialStore;
