//! The credential store collaborator.

use async_trait::async_trait;

use jobhub_core::result::AppResult;
use jobhub_entity::user::UserSummary;

/// Persistence for registered users and their password hashes.
///
/// Usernames are unique. Implementations hash passwords themselves; plaintext
/// never leaves the call.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Returns `true` if the username exists and the password matches.
    async fn verify(&self, username: &str, password: &str) -> AppResult<bool>;

    /// Returns `true` if the username is registered.
    async fn exists(&self, username: &str) -> AppResult<bool>;

    /// Registers a new user. Fails with `Conflict` if the username is taken.
    async fn create(&self, username: &str, password: &str) -> AppResult<UserSummary>;

    /// Number of registered users.
    async fn count(&self) -> AppResult<u64>;

    /// All users, newest registration first.
    async fn list(&self) -> AppResult<Vec<UserSummary>>;
}
