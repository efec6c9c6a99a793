//! Broker trait for pluggable job transports.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for job transports (Redis or in-memory).
///
/// A transport is two things at once: a set of named FIFO queues that
/// decouple submission from execution, and a key-value result store with
/// per-key TTL. All values are strings (JSON). Implementations are
/// responsible for key prefixing and TTL enforcement, and must report an
/// unreachable backend as a `ServiceUnavailable` error.
#[async_trait]
pub trait BrokerProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Append a message to the tail of a queue.
    async fn push(&self, queue: &str, message: &str) -> AppResult<()>;

    /// Remove and return the message at the head of a queue, waiting up to
    /// `timeout` for one to arrive. Returns `None` on timeout.
    ///
    /// Each message is returned to exactly one caller.
    async fn pop(&self, queue: &str, timeout: Duration) -> AppResult<Option<String>>;

    /// Number of messages waiting in a queue.
    async fn queue_len(&self, queue: &str) -> AppResult<u64>;

    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json, ttl).await
    }

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
