//! In-process broker provider.

pub mod store;

pub use store::MemoryBrokerProvider;
