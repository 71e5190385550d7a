//! Integration tests for the HTTP surface, driving the real router with an
//! in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use deck_api::auth::API_KEY_HEADER;
use deck_api::{AppState, router};
use deck_config::AuthConfig;
use deck_db::DeckDb;

const MANAGER: &str = "mgr-secret";
const TEAM: &str = "team-secret";

async fn test_app() -> Router {
    let db = DeckDb::open_local(":memory:").await.unwrap();
    let auth = AuthConfig {
        manager_secret: MANAGER.into(),
        team_secret: TEAM.into(),
    };
    router(AppState::new(Arc::new(db), auth))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, key: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(key) = key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, key: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, json_request(Method::POST, "/tasks", key, &body)).await
}

#[tokio::test]
async fn health_endpoint() {
    let app = test_app().await;
    let (status, body) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_without_secret_is_unauthorized_and_writes_nothing() {
    let app = test_app().await;

    let (status, body) = create(&app, None, json!({"title": "Sneaky"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains(API_KEY_HEADER));

    let (_, body) = send(&app, get_request("/tasks")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn create_with_team_secret_succeeds() {
    let app = test_app().await;

    let (status, body) = create(
        &app,
        Some(TEAM),
        json!({"title": "Triage inbox", "priority": "high", "pushed_by": "crm"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["task"]["title"], "Triage inbox");
    assert_eq!(body["task"]["priority"], "high");
    assert_eq!(body["task"]["status"], "todo");
    assert_eq!(body["task"]["pushed_by"], "crm");
    assert!(body["message"].as_str().unwrap().contains("created"));
}

#[tokio::test]
async fn create_with_manager_secret_succeeds() {
    let app = test_app().await;
    let (status, _) = create(&app, Some(MANAGER), json!({"title": "Plan sprint"})).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn create_with_wrong_secret_is_unauthorized() {
    let app = test_app().await;
    let (status, body) = create(&app, Some("guess"), json!({"title": "Nope"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_without_title_is_bad_request() {
    let app = test_app().await;
    let (status, body) = create(&app, Some(TEAM), json!({"description": "no title"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_with_unknown_priority_is_bad_request_and_writes_nothing() {
    let app = test_app().await;

    let (status, body) = create(
        &app,
        Some(TEAM),
        json!({"title": "Bad prio", "priority": "extreme"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, get_request("/tasks")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn duplicate_id_is_a_conflict() {
    let app = test_app().await;

    let (status, _) = create(&app, Some(TEAM), json!({"id": "ext-1", "title": "First"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = create(&app, Some(TEAM), json!({"id": "ext-1", "title": "Second"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn list_filters_by_status() {
    let app = test_app().await;

    create(&app, Some(TEAM), json!({"id": "t1", "title": "Open one"})).await;
    create(
        &app,
        Some(TEAM),
        json!({"id": "t2", "title": "Done one", "status": "completed"}),
    )
    .await;

    let (status, body) = send(&app, get_request("/tasks?status=completed")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    assert_eq!(body["tasks"][0]["id"], "t2");

    let (_, body) = send(&app, get_request("/tasks")).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn list_with_unknown_status_filter_is_bad_request() {
    let app = test_app().await;
    let (status, body) = send(&app, get_request("/tasks?status=archived")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn update_needs_no_secret() {
    let app = test_app().await;
    create(&app, Some(TEAM), json!({"id": "t1", "title": "Advance me"})).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/tasks?id=t1",
            None,
            &json!({"status": "in_progress"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["task"]["status"], "in_progress");
    assert_eq!(body["task"]["title"], "Advance me");
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/tasks?id=tsk-ghost",
            None,
            &json!({"status": "completed"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn update_with_malformed_json_is_bad_request() {
    let app = test_app().await;
    create(&app, Some(TEAM), json!({"id": "t1", "title": "Target"})).await;

    let req = Request::builder()
        .method(Method::PUT)
        .uri("/tasks?id=t1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_requires_secret() {
    let app = test_app().await;
    create(&app, Some(TEAM), json!({"id": "t1", "title": "Keep"})).await;

    let req = Request::builder()
        .method(Method::DELETE)
        .uri("/tasks?id=t1")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Still there.
    let (_, body) = send(&app, get_request("/tasks")).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = test_app().await;
    create(&app, Some(TEAM), json!({"id": "t1", "title": "Doomed"})).await;

    let delete = |uri: &str| {
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .header(API_KEY_HEADER, MANAGER)
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = send(&app, delete("/tasks?id=t1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("deleted"));

    let (status, body) = send(&app, delete("/tasks?id=t1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn stats_endpoint_counts() {
    let app = test_app().await;

    let (_, body) = send(&app, get_request("/tasks/stats")).await;
    assert_eq!(body["stats"]["total"], 0);

    create(&app, Some(TEAM), json!({"title": "A"})).await;
    create(&app, Some(TEAM), json!({"title": "B", "status": "completed"})).await;
    create(
        &app,
        Some(TEAM),
        json!({"title": "C", "due_date": "2020-01-01T00:00:00Z"}),
    )
    .await;

    let (status, body) = send(&app, get_request("/tasks/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["stats"]["total"], 3);
    assert_eq!(body["stats"]["todo"], 2);
    assert_eq!(body["stats"]["completed"], 1);
    assert_eq!(body["stats"]["overdue"], 1);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = test_app().await;

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/tasks")
        .header(header::ORIGIN, "https://board.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, API_KEY_HEADER)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
