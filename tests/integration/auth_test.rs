//! Integration tests for account, session, and health endpoints.

mod helpers;

use std::time::Duration;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_and_login() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/register",
            Some(json!({"username": "alice", "password": "password123"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.body["message"],
        "Registration successful! Please login."
    );

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"username": "alice", "password": "password123"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful!");
    assert_eq!(response.body["username"], "alice");

    let set_cookie = response
        .headers
        .get(http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("session_id="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_register_duplicate_conflicts() {
    let app = helpers::TestApp::new().await;
    app.register("alice", "password123").await;

    let response = app
        .request(
            "POST",
            "/register",
            Some(json!({"username": "alice", "password": "otherpass1"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/register",
            Some(json!({"username": "alice", "password": "123"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.register("alice", "password123").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"username": "alice", "password": "wrongpassword"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid username or password");

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({"username": "nobody", "password": "password123"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_and_user_list() {
    let app = helpers::TestApp::new().await;
    app.register("alice", "password123").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let cookie = app.signed_in("bob").await;

    let response = app.request("GET", "/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "bob");
    assert_eq!(response.body["total_users"], 2);

    let response = app.request("GET", "/users", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["bob", "alice"]);
    assert!(response.body[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("alice").await;

    let response = app.request("GET", "/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("POST", "/logout", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");

    let response = app.request("GET", "/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let response = app
        .request("POST", "/start-task", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_forged_cookie_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "GET",
            "/me",
            None,
            Some("session_id=00000000-0000-4000-8000-000000000000"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/me", None, Some("session_id=garbage"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["broker"], "connected");
    assert_eq!(response.body["provider"], "memory");
}
