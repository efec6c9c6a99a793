//! Broker manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use jobhub_core::config::broker::BrokerConfig;
use jobhub_core::error::AppError;
use jobhub_core::result::AppResult;
use jobhub_core::traits::broker::BrokerProvider;

/// Broker manager that wraps the configured transport provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct BrokerManager {
    /// The inner broker provider.
    inner: Arc<dyn BrokerProvider>,
    /// Name of the provider, for health reporting.
    kind: &'static str,
}

impl BrokerManager {
    /// Create a new broker manager from configuration.
    pub async fn new(config: &BrokerConfig) -> AppResult<Self> {
        let (inner, kind): (Arc<dyn BrokerProvider>, &'static str) =
            match config.provider.as_str() {
                #[cfg(feature = "redis-backend")]
                "redis" => {
                    info!("Initializing Redis broker provider");
                    let client = crate::redis::RedisClient::connect(&config.redis).await?;
                    (Arc::new(crate::redis::RedisBrokerProvider::new(client)), "redis")
                }
                #[cfg(feature = "memory")]
                "memory" => {
                    info!("Initializing in-memory broker provider");
                    let provider = crate::memory::MemoryBrokerProvider::new(&config.memory);
                    (Arc::new(provider), "memory")
                }
                other => {
                    return Err(AppError::configuration(format!(
                        "Unknown broker provider: '{other}'. Supported: memory, redis"
                    )));
                }
            };

        Ok(Self { inner, kind })
    }

    /// Create a broker manager from an existing provider.
    pub fn from_provider(provider: Arc<dyn BrokerProvider>) -> Self {
        Self {
            inner: provider,
            kind: "custom",
        }
    }

    /// Name of the active provider.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

#[async_trait]
impl BrokerProvider for BrokerManager {
    async fn push(&self, queue: &str, message: &str) -> AppResult<()> {
        self.inner.push(queue, message).await
    }

    async fn pop(&self, queue: &str, timeout: Duration) -> AppResult<Option<String>> {
        self.inner.pop(queue, timeout).await
    }

    async fn queue_len(&self, queue: &str) -> AppResult<u64> {
        self.inner.queue_len(queue).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use jobhub_core::error::ErrorKind;

    #[tokio::test]
    async fn test_memory_provider_selected() {
        let manager = BrokerManager::new(&BrokerConfig::default()).await.unwrap();
        assert_eq!(manager.kind(), "memory");
        assert!(manager.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = BrokerConfig {
            provider: "rabbitmq".to_string(),
            ..BrokerConfig::default()
        };
        let err = BrokerManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_json_helpers_through_manager() {
        let manager = BrokerManager::new(&BrokerConfig::default()).await.unwrap();
        let data = serde_json::json!({"state": "PENDING"});
        manager
            .set_json("k", &data, Duration::from_secs(60))
            .await
            .unwrap();
        let back: Option<serde_json::Value> = manager.get_json("k").await.unwrap();
        assert_eq!(back, Some(data));
    }
}
