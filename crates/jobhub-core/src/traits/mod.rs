//! Core traits defined in `jobhub-core` and implemented by other crates.

pub mod broker;

pub use broker::BrokerProvider;
