//! Redis broker provider implementation.
//!
//! Queues are Redis lists (`LPUSH` to enqueue, `RPOP` to claim), result
//! entries are plain string keys written with `SET EX`.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use jobhub_core::error::{AppError, ErrorKind};
use jobhub_core::result::AppResult;
use jobhub_core::traits::broker::BrokerProvider;

use super::client::RedisClient;

/// Upper bound on the wait between two `RPOP` attempts while a pop is blocked.
const POP_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Redis-backed broker provider.
#[derive(Debug, Clone)]
pub struct RedisBrokerProvider {
    /// Redis client.
    client: RedisClient,
}

impl RedisBrokerProvider {
    /// Create a new Redis broker provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(
            ErrorKind::ServiceUnavailable,
            format!("Job transport unavailable: {e}"),
            e,
        )
    }
}

#[async_trait]
impl BrokerProvider for RedisBrokerProvider {
    async fn push(&self, queue: &str, message: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(queue);
        let mut conn = self.client.conn_mut();
        let _: i64 = conn.lpush(&full_key, message).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn pop(&self, queue: &str, timeout: Duration) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(queue);
        let mut conn = self.client.conn_mut();
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            // RPOP is atomic, so each message goes to exactly one caller.
            let message: Option<String> = redis::cmd("RPOP")
                .arg(&full_key)
                .query_async(&mut conn)
                .await
                .map_err(Self::map_err)?;
            if message.is_some() {
                return Ok(message);
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                debug!(queue, "Pop timed out");
                return Ok(None);
            }
            tokio::time::sleep((deadline - now).min(POP_RETRY_INTERVAL)).await;
        }
    }

    async fn queue_len(&self, queue: &str) -> AppResult<u64> {
        let full_key = self.client.prefixed_key(queue);
        let mut conn = self.client.conn_mut();
        let len: u64 = conn.llen(&full_key).await.map_err(Self::map_err)?;
        Ok(len)
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        // SET EX rejects a zero expiry.
        let secs = ttl.as_secs().max(1);
        let _: () = conn
            .set_ex(&full_key, value, secs)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
