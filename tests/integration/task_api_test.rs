//! Integration tests for task submission and status polling.

mod helpers;

use std::collections::HashSet;

use http::StatusCode;
use serde_json::json;

fn rank(state: &str) -> u8 {
    match state {
        "PENDING" => 0,
        "STARTED" => 1,
        "SUCCESS" | "FAILURE" => 2,
        other => panic!("unexpected state {other}"),
    }
}

#[tokio::test]
async fn test_start_task_requires_session() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "send_email"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Not logged in");

    let response = app
        .request("GET", "/task-status/anything", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_process_data_completes() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("alice").await;

    let response = app
        .request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "process_data", "data": {"rows": [1, 2, 3]}})),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "started");
    assert_eq!(response.body["message"], "process_data started in background");
    let task_id = response.body["task_id"].as_str().unwrap().to_string();

    let seen = app.poll_until_done(&task_id, &cookie).await;
    let last = seen.last().unwrap();
    assert_eq!(last["state"], "SUCCESS");
    assert_eq!(last["status"], "Task completed!");

    let result = &last["result"];
    assert_eq!(result["user_id"], "alice");
    assert_eq!(result["data"], json!({"rows": [1, 2, 3]}));
    assert_eq!(result["status"], "completed");
    let units = result["processing_time"].as_u64().unwrap();
    assert!((3..=10).contains(&units));
}

#[tokio::test]
async fn test_empty_body_defaults_to_process_data() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("alice").await;

    let response = app
        .request("POST", "/start-task", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "process_data started in background");

    let task_id = response.body["task_id"].as_str().unwrap().to_string();
    let seen = app.poll_until_done(&task_id, &cookie).await;
    let result = &seen.last().unwrap()["result"];
    assert_eq!(result["data"], json!({"sample": "data"}));
}

#[tokio::test]
async fn test_send_email_uses_defaults() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("bob").await;

    let response = app
        .request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "send_email"})),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let task_id = response.body["task_id"].as_str().unwrap().to_string();

    let seen = app.poll_until_done(&task_id, &cookie).await;
    let last = seen.last().unwrap();
    assert_eq!(last["state"], "SUCCESS");
    assert_eq!(
        last["result"],
        json!({"email": "bob@example.com", "status": "sent"})
    );
}

#[tokio::test]
async fn test_send_email_to_bad_address_fails() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("bob").await;

    let response = app
        .request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "send_email", "email": "not-an-address"})),
            Some(&cookie),
        )
        .await;
    let task_id = response.body["task_id"].as_str().unwrap().to_string();

    let seen = app.poll_until_done(&task_id, &cookie).await;
    let last = seen.last().unwrap();
    assert_eq!(last["state"], "FAILURE");
    assert_eq!(last["status"], "Task failed");
    assert_eq!(last["error"], "Invalid email address: not-an-address");
    assert!(last.get("result").is_none());
}

#[tokio::test]
async fn test_generate_report_for_alice() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("alice").await;

    let response = app
        .request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "generate_report"})),
            Some(&cookie),
        )
        .await;
    let task_id = response.body["task_id"].as_str().unwrap().to_string();

    let seen = app.poll_until_done(&task_id, &cookie).await;
    assert_eq!(
        seen.last().unwrap()["result"],
        json!({"user_id": "alice", "report": "monthly_report.pdf"})
    );
}

#[tokio::test]
async fn test_invalid_task_type_is_rejected_and_not_enqueued() {
    let app = helpers::TestApp::without_workers().await;
    let cookie = app.signed_in("alice").await;
    let before = app.state.queue.queue_len().await.unwrap();

    let response = app
        .request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "bogus"})),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid task type");
    assert_eq!(response.body["code"], "VALIDATION_ERROR");

    assert_eq!(app.state.queue.queue_len().await.unwrap(), before);
}

#[tokio::test]
async fn test_job_stays_pending_without_workers() {
    let app = helpers::TestApp::without_workers().await;
    let cookie = app.signed_in("alice").await;

    let response = app
        .request("POST", "/start-task", None, Some(&cookie))
        .await;
    let task_id = response.body["task_id"].as_str().unwrap().to_string();
    assert_eq!(app.state.queue.queue_len().await.unwrap(), 1);

    let status = app
        .request("GET", &format!("/task-status/{task_id}"), None, Some(&cookie))
        .await;
    assert_eq!(status.status, StatusCode::OK);
    assert_eq!(
        status.body,
        json!({"state": "PENDING", "status": "Task is waiting to be processed..."})
    );
}

#[tokio::test]
async fn test_polled_states_never_regress() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("alice").await;

    let response = app
        .request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "generate_report"})),
            Some(&cookie),
        )
        .await;
    let task_id = response.body["task_id"].as_str().unwrap().to_string();

    let seen = app.poll_until_done(&task_id, &cookie).await;
    let ranks: Vec<u8> = seen
        .iter()
        .map(|body| rank(body["state"].as_str().unwrap()))
        .collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{ranks:?}");
}

#[tokio::test]
async fn test_concurrent_submissions_get_distinct_ids() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("alice").await;

    let submissions = (0..10).map(|n| {
        app.request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "process_data", "data": {"n": n}})),
            Some(&cookie),
        )
    });
    let responses = futures::future::join_all(submissions).await;

    let ids: Vec<String> = responses
        .iter()
        .map(|r| {
            assert_eq!(r.status, StatusCode::OK);
            r.body["task_id"].as_str().unwrap().to_string()
        })
        .collect();
    let distinct: HashSet<&String> = ids.iter().collect();
    assert_eq!(distinct.len(), 10);

    for (n, id) in ids.iter().enumerate() {
        let seen = app.poll_until_done(id, &cookie).await;
        let last = seen.last().unwrap();
        assert_eq!(last["state"], "SUCCESS");
        assert_eq!(last["result"]["data"], json!({"n": n}));
    }
}

#[tokio::test]
async fn test_unknown_task_id_is_not_found() {
    let app = helpers::TestApp::new().await;
    let cookie = app.signed_in("alice").await;

    let response = app
        .request(
            "GET",
            &format!("/task-status/{}", uuid_like()),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Unknown task id");

    let response = app
        .request("GET", "/task-status/not-a-task", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

fn uuid_like() -> &'static str {
    "00000000-0000-4000-8000-000000000000"
}

#[tokio::test]
async fn test_unreachable_transport_returns_503() {
    let (app, transport) = helpers::TestApp::with_switchable_transport().await;
    let cookie = app.signed_in("alice").await;

    let response = app
        .request("POST", "/start-task", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let task_id = response.body["task_id"].as_str().unwrap().to_string();

    transport.take_down();

    let response = app
        .request(
            "POST",
            "/start-task",
            Some(json!({"task_type": "generate_report"})),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["code"], "SERVICE_UNAVAILABLE");
    assert!(response.body.get("task_id").is_none());

    let response = app
        .request("GET", &format!("/task-status/{task_id}"), None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["code"], "SERVICE_UNAVAILABLE");

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "unhealthy");
    assert_eq!(response.body["error"], "Broker health check failed");
}
