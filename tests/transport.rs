use std::net::TcpListener as StdListener;
use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use chrono::Local;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use montage_cli::montage::{build, interpret, Endpoint, HttpTransport, SessionCommand, Transport, UserInput};
use montage_cli::MontageError;

type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

#[derive(Clone)]
struct FakeMontage {
    status: StatusCode,
    body: &'static str,
    seen: Seen,
}

async fn graphql(State(fake): State<FakeMontage>, headers: HeaderMap, body: String) -> (StatusCode, &'static str) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let json = serde_json::from_str(&body).unwrap_or(Value::Null);
    fake.seen.lock().unwrap().push((content_type, json));
    (fake.status, fake.body)
}

/// Serve `body` with `status` on an ephemeral port; returns the endpoint URL.
async fn serve(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new().route("/graphql", post(graphql)).with_state(FakeMontage {
        status,
        body,
        seen: seen.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    (format!("http://{addr}/graphql"), seen)
}

const START_BODY: &str = r#"{"data":{"start":{"description":"Write report","duration":"PT25M","projectedEndTime":"2024-01-01T09:05:00"}}}"#;

fn write_report() -> UserInput {
    UserInput {
        description: Some("Write report".to_string()),
        minutes: Some("25".to_string()),
        target: None,
    }
}

#[tokio::test]
async fn test_start_round_trip() {
    let (url, seen) = serve(StatusCode::OK, START_BODY).await;
    let endpoint = Endpoint::parse(&url).unwrap();
    let input = write_report();
    let envelope = build(SessionCommand::Start, &input, Local::now()).unwrap();

    let body = HttpTransport::new()
        .send(&endpoint, &envelope, "Problem starting session in Montage")
        .await
        .unwrap();
    let report = interpret(SessionCommand::Start, &body, &input).unwrap();

    assert_eq!(report.minutes, Some(25));
    assert_eq!(report.description.as_deref(), Some("Write report"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (content_type, request) = &seen[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert!(request["query"].as_str().unwrap().contains("start(description: $description"));
    assert_eq!(request["variables"]["duration"], "PT25M");
    assert_eq!(request["variables"]["kind"], "TASK");
}

#[tokio::test]
async fn test_empty_body_is_empty_response() {
    let (url, _) = serve(StatusCode::OK, "").await;
    let endpoint = Endpoint::parse(&url).unwrap();
    let envelope = build(SessionCommand::Start, &write_report(), Local::now()).unwrap();

    let err = HttpTransport::new().send(&endpoint, &envelope, "ctx").await.unwrap_err();
    assert!(matches!(err, MontageError::EmptyResponse));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_server_error_without_body() {
    let (url, _) = serve(StatusCode::INTERNAL_SERVER_ERROR, "").await;
    let endpoint = Endpoint::parse(&url).unwrap();
    let envelope = build(SessionCommand::Extend, &write_report(), Local::now()).unwrap();

    let err = HttpTransport::new().send(&endpoint, &envelope, "ctx").await.unwrap_err();
    assert!(matches!(err, MontageError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_html_error_page_keeps_the_status() {
    let (url, _) = serve(StatusCode::BAD_GATEWAY, "<html>502 Bad Gateway</html>").await;
    let endpoint = Endpoint::parse(&url).unwrap();
    let envelope = build(SessionCommand::Start, &write_report(), Local::now()).unwrap();

    let err = HttpTransport::new()
        .send(&endpoint, &envelope, "Problem starting session in Montage")
        .await
        .unwrap_err();
    assert!(matches!(err, MontageError::HttpStatus { status: 502, .. }));
    assert!(err.is_transport());
    assert_eq!(err.to_string(), "Problem starting session in Montage: server returned HTTP 502");
}

#[tokio::test]
async fn test_graphql_errors_reach_the_user() {
    let (url, _) = serve(
        StatusCode::BAD_REQUEST,
        r#"{"errors":[{"message":"No session to extend"}]}"#,
    )
    .await;
    let endpoint = Endpoint::parse(&url).unwrap();
    let input = write_report();
    let envelope = build(SessionCommand::Extend, &input, Local::now()).unwrap();

    let body = HttpTransport::new().send(&endpoint, &envelope, "ctx").await.unwrap();
    let err = interpret(SessionCommand::Extend, &body, &input).unwrap_err();
    assert!(matches!(err, MontageError::Protocol(ref m) if m.contains("No session to extend")));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let port = StdListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let endpoint = Endpoint::parse(&format!("http://127.0.0.1:{port}/graphql")).unwrap();
    let envelope = build(SessionCommand::Start, &write_report(), Local::now()).unwrap();

    let err = HttpTransport::new()
        .send(&endpoint, &envelope, "Problem starting session in Montage")
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().starts_with("Problem starting session in Montage"));
}

#[test]
fn test_cli_start_against_fake_server() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (url, seen) = runtime.block_on(serve(StatusCode::OK, START_BODY));
    let home = TempDir::new().unwrap();

    Command::cargo_bin("montage-cli")
        .unwrap()
        .env("HOME", home.path())
        .env_remove("MONTAGE_LOG")
        .args(["--endpoint", &url, "start", "Write report", "-m", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started \"Write report\" for 25 minutes, until 9:5"));

    assert_eq!(seen.lock().unwrap().len(), 1);
}
