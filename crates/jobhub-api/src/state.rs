//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use jobhub_auth::{CredentialStore, SessionManager};
use jobhub_broker::BrokerManager;
use jobhub_core::config::AppConfig;
use jobhub_service::{TaskDispatcher, TaskStatusReporter, UserService};
use jobhub_worker::JobQueue;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Job transport (Redis or in-memory)
    pub broker: BrokerManager,
    /// Job queue over the transport
    pub queue: Arc<JobQueue>,

    // ── Auth ─────────────────────────────────────────────────
    /// Registration, login, and session validation
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// Task submission
    pub dispatcher: Arc<TaskDispatcher>,
    /// Task status polling
    pub reporter: Arc<TaskStatusReporter>,
    /// User queries
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire every service over one transport and one credential store.
    pub fn new(
        config: Arc<AppConfig>,
        broker: BrokerManager,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let queue = Arc::new(JobQueue::new(broker.clone(), &config.broker));
        let session_manager = Arc::new(SessionManager::with_broker(
            Arc::clone(&credentials),
            broker.clone(),
            &config.auth,
            &config.session,
        ));

        Self {
            dispatcher: Arc::new(TaskDispatcher::new(Arc::clone(&queue))),
            reporter: Arc::new(TaskStatusReporter::new(Arc::clone(&queue))),
            user_service: Arc::new(UserService::new(credentials)),
            session_manager,
            queue,
            broker,
            config,
        }
    }
}
