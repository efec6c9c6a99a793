//! Read-only user queries: dashboard summary and the user listing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use jobhub_auth::CredentialStore;
use jobhub_core::result::AppResult;
use jobhub_entity::user::UserSummary;

use crate::context::RequestContext;

/// Data shown on the signed-in landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardInfo {
    /// The caller's username.
    pub username: String,
    /// Number of registered users.
    pub total_users: u64,
}

/// Handles user queries.
#[derive(Debug, Clone)]
pub struct UserService {
    credentials: Arc<dyn CredentialStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Summary for the caller's dashboard.
    pub async fn dashboard(&self, ctx: &RequestContext) -> AppResult<DashboardInfo> {
        Ok(DashboardInfo {
            username: ctx.username.clone(),
            total_users: self.credentials.count().await?,
        })
    }

    /// All users, newest first.
    pub async fn list_users(&self, _ctx: &RequestContext) -> AppResult<Vec<UserSummary>> {
        self.credentials.list().await
    }
}
