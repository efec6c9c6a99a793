//! Route definitions for the JobHub HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the logging middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(task_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Background task submission and polling
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/start-task", post(handlers::tasks::start_task))
        .route("/task-status/{task_id}", get(handlers::tasks::task_status))
}

/// Registration, login, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
}

/// Signed-in user views
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::users::me))
        .route("/users", get(handlers::users::list_users))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
