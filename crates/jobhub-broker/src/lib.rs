//! # jobhub-broker
//!
//! Job transport implementations for JobHub. A transport is a set of named
//! FIFO queues plus a key-value result store with per-key TTL. Two modes:
//!
//! - **memory**: in-process queues and a [moka](https://crates.io/crates/moka) store
//! - **redis**: Redis lists and `SET EX` keys via the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::BrokerManager;
