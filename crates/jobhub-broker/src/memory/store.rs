//! In-memory transport: notify-driven FIFO queues plus moka key-value stores.
//!
//! Job records live in their own store bounded only by TTL, so a burst of
//! jobs can never evict an issued record. Every other key (sessions) goes to a
//! store capped at `max_capacity`.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use moka::Expiry;
use moka::future::Cache;
use tokio::sync::{Mutex, Notify};
use tracing::debug;

use crate::keys;

use jobhub_core::config::broker::MemoryBrokerConfig;
use jobhub_core::result::AppResult;
use jobhub_core::traits::broker::BrokerProvider;

/// A stored value together with the TTL it was written with.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Per-entry expiry policy: each write carries its own TTL.
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// One named queue.
#[derive(Debug, Default)]
struct MemoryQueue {
    items: Mutex<VecDeque<String>>,
    notify: Notify,
}

/// In-memory broker provider.
#[derive(Debug, Clone)]
pub struct MemoryBrokerProvider {
    queues: Arc<DashMap<String, Arc<MemoryQueue>>>,
    /// Job records; no size bound.
    records: Cache<String, Entry>,
    /// Everything else; size-bounded.
    store: Cache<String, Entry>,
}

impl MemoryBrokerProvider {
    /// Create a new in-memory broker from configuration.
    pub fn new(config: &MemoryBrokerConfig) -> Self {
        let records = Cache::builder().expire_after(EntryExpiry).build();
        let store = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self {
            queues: Arc::new(DashMap::new()),
            records,
            store,
        }
    }

    fn store_for(&self, key: &str) -> &Cache<String, Entry> {
        if keys::is_task_meta(key) {
            &self.records
        } else {
            &self.store
        }
    }

    fn queue(&self, name: &str) -> Arc<MemoryQueue> {
        self.queues
            .entry(name.to_string())
            .or_default()
            .value()
            .clone()
    }
}

#[async_trait]
impl BrokerProvider for MemoryBrokerProvider {
    async fn push(&self, queue: &str, message: &str) -> AppResult<()> {
        let q = self.queue(queue);
        q.items.lock().await.push_back(message.to_string());
        q.notify.notify_one();
        Ok(())
    }

    async fn pop(&self, queue: &str, timeout: Duration) -> AppResult<Option<String>> {
        let q = self.queue(queue);
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            // Register interest before checking so a concurrent push cannot be missed.
            let notified = q.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(message) = q.items.lock().await.pop_front() {
                return Ok(Some(message));
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                debug!(queue, "Pop timed out");
                return Ok(None);
            }
        }
    }

    async fn queue_len(&self, queue: &str) -> AppResult<u64> {
        let Some(q) = self.queues.get(queue).map(|q| q.value().clone()) else {
            return Ok(0);
        };
        let len = q.items.lock().await.len();
        Ok(len as u64)
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.store_for(key).get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.store_for(key)
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.store_for(key).invalidate(key).await;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
