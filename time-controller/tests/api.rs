//! Router tests against a mocked supervisor
//!
//! Requests go through the full axum router via `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

use supervisor::{Confirmation, FakeTime, MockTimeControl, SupervisorError, SupervisorStatus};
use time_controller::ControlServer;

fn router(control: MockTimeControl) -> Router {
    let addr: SocketAddr = "127.0.0.1:5000".parse().unwrap();
    ControlServer::new(addr, Arc::new(control)).build_router()
}

fn set_time_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/set_time")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_set_time_restarts_and_confirms() {
    let mut control = MockTimeControl::new();
    control
        .expect_restart_with()
        .withf(|fake_time| fake_time.as_deref() == Some("2021-01-01 00:00:00"))
        .times(1)
        .returning(|fake_time| {
            Ok(Confirmation {
                fake_time: FakeTime::parse(fake_time.as_deref()).ok(),
                pid: 4242,
            })
        });

    let (status, body) = send(router(control), set_time_request(r#"{"fake_time": "2021-01-01 00:00:00"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Fake time set to 2021-01-01 00:00:00");
}

#[tokio::test]
async fn test_set_time_without_fake_time_is_rejected() {
    let mut control = MockTimeControl::new();
    control.expect_restart_with().times(0);

    let (status, body) = send(router(control), set_time_request("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No fake time provided");
}

#[tokio::test]
async fn test_set_time_with_empty_fake_time_is_rejected() {
    let mut control = MockTimeControl::new();
    control.expect_restart_with().times(0);

    let (status, body) = send(router(control), set_time_request(r#"{"fake_time": ""}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No fake time provided");
}

#[tokio::test]
async fn test_set_time_with_nul_byte_is_rejected() {
    let mut control = MockTimeControl::new();
    control.expect_restart_with().times(0);

    let (status, body) = send(router(control), set_time_request(r#"{"fake_time": "+1d\u0000"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Fake time must not contain NUL bytes");
}

#[tokio::test]
async fn test_set_time_with_malformed_body() {
    let mut control = MockTimeControl::new();
    control.expect_restart_with().times(0);

    let (status, body) = send(router(control), set_time_request(r#"{"fake_time": 5}"#)).await;

    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_launch_failure_is_reported_as_server_error() {
    let mut control = MockTimeControl::new();
    control.expect_restart_with().times(1).returning(|_| {
        Err(SupervisorError::launch(
            "/nethermind/Nethermind.Runner",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        ))
    });

    let (status, body) = send(router(control), set_time_request(r#"{"fake_time": "+1d"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Nethermind.Runner"));
}

#[tokio::test]
async fn test_status_reports_supervisor_state() {
    let mut control = MockTimeControl::new();
    control.expect_status().times(1).returning(|| SupervisorStatus {
        running: true,
        pid: Some(77),
        fake_time: Some("+3d".to_string()),
        started_at: None,
        launches: 2,
    });

    let request = Request::builder().uri("/status").body(Body::empty()).unwrap();
    let (status, body) = send(router(control), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["running"], true);
    assert_eq!(body["pid"], 77);
    assert_eq!(body["fake_time"], "+3d");
    assert_eq!(body["launches"], 2);
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(router(MockTimeControl::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_set_time_requires_post() {
    let request = Request::builder().uri("/set_time").body(Body::empty()).unwrap();
    let (status, _) = send(router(MockTimeControl::new()), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
