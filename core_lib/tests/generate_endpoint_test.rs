use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use core_lib::{create_app, AppState, GeneratorConfig, TemplateGenerator};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with_stub(dir: &tempfile::TempDir, script_body: &str) -> Router {
    let script = dir.path().join("generator.sh");
    std::fs::write(&script, format!("#!/bin/sh\n{}\n", script_body)).unwrap();

    let generator = TemplateGenerator::new(GeneratorConfig {
        command: "sh".to_string(),
        script,
        timeout_seconds: 5,
        default_target_company: "Your Organization".to_string(),
    });

    create_app(AppState::new(generator))
}

async fn send(app: Router, method: Method, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri("/api/templates/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, &body.to_string()).await
}

#[tokio::test]
async fn test_missing_scenario_never_invokes_generator() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("invoked");
    let app = app_with_stub(
        &dir,
        &format!("touch {}\necho '{{}}'", marker.display()),
    );

    let (status, body) = post_json(app, json!({"target_company": "Acme"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Scenario is required"));
    assert!(!marker.exists(), "generator must not run without a scenario");
}

#[tokio::test]
async fn test_get_method_not_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("invoked");
    let app = app_with_stub(
        &dir,
        &format!("touch {}\necho '{{}}'", marker.display()),
    );

    let (status, body) = send(app, Method::GET, "").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Method not allowed"));
    assert!(!marker.exists());
}

#[tokio::test]
async fn test_invalid_json_body() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(&dir, "echo '{}'");

    let (status, body) = send(app, Method::POST, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Invalid JSON structure"));
}

#[tokio::test]
async fn test_successful_generation() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(&dir, r#"echo '{"subject":"S","html":"H","text":"T"}'"#);

    let (status, body) = post_json(app, json!({"scenario": "password reset"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"subject": "S", "html": "H", "text": "T"}));
}

#[tokio::test]
async fn test_landing_page_included_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(
        &dir,
        r#"for arg in "$@"; do
  if [ "$arg" = "--include-landing-page" ]; then
    echo '{"subject":"S","html":"H","text":"T","landing_page":"<html></html>"}'
    exit 0
  fi
done
echo '{"subject":"S","html":"H","text":"T"}'"#,
    );

    let (status, body) = post_json(
        app,
        json!({"scenario": "invoice", "include_landing_page": true}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["landing_page"], json!("<html></html>"));
}

#[tokio::test]
async fn test_empty_target_company_uses_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    // Echo the --target argument back so the test can observe what the
    // generator was actually passed.
    let app = app_with_stub(
        &dir,
        r#"target=""
while [ $# -gt 0 ]; do
  if [ "$1" = "--target" ]; then target="$2"; fi
  shift
done
printf '{"subject":"S","html":"H","text":"%s"}' "$target""#,
    );

    let (status, body) = post_json(
        app,
        json!({"scenario": "password reset", "target_company": ""}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], json!("Your Organization"));
}

#[tokio::test]
async fn test_sentinel_subject_returns_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(
        &dir,
        r#"echo '{"subject":"Error: API Key Not Set","html":"","text":"reason"}'"#,
    );

    let (status, body) = post_json(app, json!({"scenario": "password reset"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("reason"), "unexpected message: {}", message);
}

#[tokio::test]
async fn test_execution_failure_surfaces_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_stub(&dir, "echo 'missing credentials' >&2; echo 'not json'; exit 2");

    let (status, body) = post_json(app, json!({"scenario": "password reset"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("execution failed"), "unexpected message: {}", message);
    assert!(message.contains("missing credentials"), "unexpected message: {}", message);
}
