//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tokio::sync::watch;
use tower::ServiceExt;

use jobhub_api::AppState;
use jobhub_auth::{CredentialStore, MemoryCredentialStore};
use jobhub_broker::memory::MemoryBrokerProvider;
use jobhub_broker::{BrokerManager, keys};
use jobhub_core::config::{AppConfig, MemoryBrokerConfig};
use jobhub_core::error::AppError;
use jobhub_core::result::AppResult;
use jobhub_core::traits::broker::BrokerProvider;
use jobhub_worker::{JobHandler, SimulatedTaskHandler, WorkerRunner};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct queue inspection
    pub state: AppState,
    shutdown: watch::Sender<bool>,
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// App over the in-memory transport with a running worker pool.
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// App with no workers, so submitted jobs stay queued.
    pub async fn without_workers() -> Self {
        Self::build(false).await
    }

    /// App without workers over a transport whose job side can be switched off.
    pub async fn with_switchable_transport() -> (Self, Arc<SwitchableBroker>) {
        let provider = Arc::new(SwitchableBroker::new());
        let broker = BrokerManager::from_provider(provider.clone());
        (Self::with_broker(broker, false), provider)
    }

    async fn build(with_workers: bool) -> Self {
        let config = test_config();
        let broker = BrokerManager::new(&config.broker)
            .await
            .expect("Failed to init memory broker");
        Self::with_broker(broker, with_workers)
    }

    fn with_broker(broker: BrokerManager, with_workers: bool) -> Self {
        let config = Arc::new(test_config());
        let credentials: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
        let state = AppState::new(Arc::clone(&config), broker, credentials);

        let (shutdown, rx) = watch::channel(false);
        if with_workers {
            let handler: Arc<dyn JobHandler> =
                Arc::new(SimulatedTaskHandler::from_config(&config.worker));
            let runner = WorkerRunner::new(
                Arc::clone(&state.queue),
                handler,
                config.worker.clone(),
                "test-worker".to_string(),
            );
            tokio::spawn(async move { runner.run(rx).await });
        }

        Self {
            router: jobhub_api::build_app(state.clone()),
            state,
            shutdown,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register an account, asserting success.
    pub async fn register(&self, username: &str, password: &str) {
        let resp = self
            .request(
                "POST",
                "/register",
                Some(serde_json::json!({"username": username, "password": password})),
                None,
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "register: {:?}", resp.body);
    }

    /// Log in and return the `name=value` session cookie.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let resp = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({"username": username, "password": password})),
                None,
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "login: {:?}", resp.body);
        session_cookie(&resp.headers).expect("login did not set a session cookie")
    }

    /// Register and log in a fresh user.
    pub async fn signed_in(&self, username: &str) -> String {
        self.register(username, "password123").await;
        self.login(username, "password123").await
    }

    /// Poll a task until it reaches a terminal state, collecting every body seen.
    pub async fn poll_until_done(&self, task_id: &str, cookie: &str) -> Vec<Value> {
        let uri = format!("/task-status/{task_id}");
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        let mut seen = Vec::new();

        loop {
            let resp = self.request("GET", &uri, None, Some(cookie)).await;
            assert_eq!(resp.status, StatusCode::OK, "poll: {:?}", resp.body);
            let state = resp.body["state"].as_str().unwrap_or_default().to_string();
            seen.push(resp.body);
            if state == "SUCCESS" || state == "FAILURE" {
                return seen;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "task {task_id} did not finish, last seen {state}"
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.broker.provider = "memory".to_string();
    config.worker.time_unit_millis = 1;
    config.worker.concurrency = 4;
    config.worker.poll_interval_seconds = 1;
    config
}

/// Memory transport whose queue and job records can be made unreachable
/// while sessions keep working.
#[derive(Debug)]
pub struct SwitchableBroker {
    inner: MemoryBrokerProvider,
    down: AtomicBool,
}

impl SwitchableBroker {
    fn new() -> Self {
        Self {
            inner: MemoryBrokerProvider::new(&MemoryBrokerConfig::default()),
            down: AtomicBool::new(false),
        }
    }

    /// Make job traffic fail from now on.
    pub fn take_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    fn check(&self, key: &str) -> AppResult<()> {
        let is_session = key.starts_with(&keys::session(""));
        if self.down.load(Ordering::SeqCst) && !is_session {
            return Err(AppError::service_unavailable(
                "Job transport unavailable: connection refused",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl BrokerProvider for SwitchableBroker {
    async fn push(&self, queue: &str, message: &str) -> AppResult<()> {
        self.check(queue)?;
        self.inner.push(queue, message).await
    }

    async fn pop(&self, queue: &str, timeout: Duration) -> AppResult<Option<String>> {
        self.check(queue)?;
        self.inner.pop(queue, timeout).await
    }

    async fn queue_len(&self, queue: &str) -> AppResult<u64> {
        self.check(queue)?;
        self.inner.queue_len(queue).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check(key)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.check(key)?;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.check(key)?;
        self.inner.delete(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.down.load(Ordering::SeqCst))
    }
}

/// Extract `name=value` from the first `Set-Cookie` header.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(|pair| pair.trim().to_string())
}
