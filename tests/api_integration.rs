//! End-to-end tests driving the router the way an HTTP client would.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use issue_tracker_api::api::create_router;
use issue_tracker_api::store::IssueStore;

fn app() -> Router {
    create_router(IssueStore::shared())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn parse_timestamp(value: &Value) -> chrono::DateTime<chrono::Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("timestamp field should be RFC 3339")
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, issue) = send(app, Method::POST, "/issues", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    issue
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();
    let created = create(&app, json!({"title": "Fix login bug"})).await;

    assert_eq!(created["status"], "open");
    assert_eq!(created["priority"], "medium");
    assert_eq!(created["created_at"], created["updated_at"]);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/issues/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let app = app();
    let mut ids = Vec::new();
    for n in 0..10 {
        let issue = create(&app, json!({"title": format!("issue {}", n)})).await;
        ids.push(issue["id"].as_str().unwrap().to_string());
    }

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[tokio::test]
async fn test_get_unknown_id_returns_structured_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/issues/no-such-id", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Issue not found");
    assert!(body["message"].as_str().unwrap().contains("no-such-id"));
    assert!(body["suggestion"].as_str().unwrap().contains("GET /issues"));
}

#[tokio::test]
async fn test_create_rejects_empty_and_oversized_title() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/issues", Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    let (status, _) = send(
        &app,
        Method::POST,
        "/issues",
        Some(json!({"title": "x".repeat(201)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_unknown_enum_value() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/issues",
        Some(json!({"title": "ok", "status": "done"})),
    )
    .await;

    // Unknown enum tags fail body deserialization at the boundary.
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_partial_update_leaves_omitted_fields_untouched() {
    let app = app();
    let created = create(
        &app,
        json!({
            "title": "Fix login bug",
            "description": "Crashes on submit",
            "assignee": "alice@example.com"
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/issues/{}", id),
        Some(json!({"priority": "high"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["title"], "Fix login bug");
    assert_eq!(updated["description"], "Crashes on submit");
    assert_eq!(updated["status"], "open");
    assert_eq!(updated["assignee"], "alice@example.com");
    assert_eq!(updated["created_at"], created["created_at"]);

    let before = parse_timestamp(&created["updated_at"]);
    let after = parse_timestamp(&updated["updated_at"]);
    assert!(after >= before);
}

#[tokio::test]
async fn test_explicit_null_clears_assignee() {
    let app = app();
    let created = create(
        &app,
        json!({"title": "Fix login bug", "assignee": "alice@example.com"}),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/issues/{}", id),
        Some(json!({"assignee": null})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(updated["assignee"].is_null());
    // Omitting the field entirely leaves it cleared.
    let (_, fetched) = send(&app, Method::GET, &format!("/issues/{}", id), None).await;
    assert!(fetched["assignee"].is_null());
}

#[tokio::test]
async fn test_update_unknown_id_returns_404_without_side_effects() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/issues/no-such-id",
        Some(json!({"title": "ghost"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Issue not found");

    let (_, list) = send(&app, Method::GET, "/issues", None).await;
    assert_eq!(list["pagination"]["totalCount"], 0);
}

#[tokio::test]
async fn test_status_transitions_are_unrestricted() {
    let app = app();
    let created = create(&app, json!({"title": "Reopen me", "status": "closed"})).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/issues/{}", id),
        Some(json!({"status": "open"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "open");
}

#[tokio::test]
async fn test_filters_are_conjunctive() {
    let app = app();
    create(&app, json!({"title": "a", "status": "open", "priority": "high"})).await;
    create(&app, json!({"title": "b", "status": "open", "priority": "low"})).await;
    create(&app, json!({"title": "c", "status": "closed", "priority": "high"})).await;

    let (status, list) = send(
        &app,
        Method::GET,
        "/issues?status=open&priority=high",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["pagination"]["totalCount"], 1);
    assert_eq!(list["issues"][0]["title"], "a");
    assert_eq!(list["filters_applied"]["status"], "open");
    assert_eq!(list["filters_applied"]["priority"], "high");
    assert!(list["filters_applied"]["search"].is_null());
}

#[tokio::test]
async fn test_search_is_case_insensitive_across_fields() {
    let app = app();
    create(&app, json!({"title": "Fix login bug"})).await;
    create(&app, json!({"title": "Add dark mode"})).await;
    create(
        &app,
        json!({"title": "Polish UI", "description": "Tweak the LOGIN page"}),
    )
    .await;

    let (_, list) = send(&app, Method::GET, "/issues?search=login", None).await;
    assert_eq!(list["pagination"]["totalCount"], 2);
}

#[tokio::test]
async fn test_example_scenario_priority_sort_and_search() {
    let app = app();
    let a = create(&app, json!({"title": "Fix login bug"})).await;
    let b = create(&app, json!({"title": "Add dark mode", "priority": "critical"})).await;

    let (_, list) = send(
        &app,
        Method::GET,
        "/issues?sort_by=priority&sort_order=desc",
        None,
    )
    .await;
    assert_eq!(list["issues"][0]["id"], b["id"]);
    assert_eq!(list["issues"][1]["id"], a["id"]);
    assert_eq!(list["sorting"]["sort_by"], "priority");
    assert_eq!(list["sorting"]["sort_order"], "desc");

    let (_, list) = send(&app, Method::GET, "/issues?search=login", None).await;
    assert_eq!(list["pagination"]["totalCount"], 1);
    assert_eq!(list["issues"][0]["id"], a["id"]);
}

#[tokio::test]
async fn test_sort_stability_preserves_insertion_order() {
    let app = app();
    let first = create(&app, json!({"title": "first", "priority": "high"})).await;
    let second = create(&app, json!({"title": "second", "priority": "high"})).await;

    let (_, list) = send(
        &app,
        Method::GET,
        "/issues?sort_by=priority&sort_order=asc",
        None,
    )
    .await;

    assert_eq!(list["issues"][0]["id"], first["id"]);
    assert_eq!(list["issues"][1]["id"], second["id"]);
}

#[tokio::test]
async fn test_unknown_sort_by_falls_back_to_updated_at() {
    let app = app();
    create(&app, json!({"title": "only"})).await;

    let (status, list) = send(&app, Method::GET, "/issues?sort_by=nonsense", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["sorting"]["sort_by"], "updated_at");
}

#[tokio::test]
async fn test_pagination_concatenation_is_complete() {
    let app = app();
    for n in 0..23 {
        create(&app, json!({"title": format!("issue {:02}", n)})).await;
    }

    let (_, first) = send(
        &app,
        Method::GET,
        "/issues?page=1&page_size=10&sort_by=created_at&sort_order=asc",
        None,
    )
    .await;
    assert_eq!(first["pagination"]["totalCount"], 23);
    assert_eq!(first["pagination"]["totalPages"], 3);
    assert_eq!(first["pagination"]["pageSize"], 10);

    let mut seen = Vec::new();
    for page in 1..=3 {
        let uri = format!(
            "/issues?page={}&page_size=10&sort_by=created_at&sort_order=asc",
            page
        );
        let (_, chunk) = send(&app, Method::GET, &uri, None).await;
        for issue in chunk["issues"].as_array().unwrap() {
            seen.push(issue["id"].as_str().unwrap().to_string());
        }
    }

    assert_eq!(seen.len(), 23);
    let mut deduped = seen.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 23);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty_not_error() {
    let app = app();
    create(&app, json!({"title": "only"})).await;

    let (status, list) = send(&app, Method::GET, "/issues?page=9&page_size=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(list["issues"].as_array().unwrap().is_empty());
    assert_eq!(list["pagination"]["totalCount"], 1);
}

#[tokio::test]
async fn test_pagination_bounds_are_rejected() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/issues?page=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    let (status, _) = send(&app, Method::GET, "/issues?page_size=101", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/issues?page_size=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_tracks_collection_size() {
    let app = app();

    let (_, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(health["total_issues"], 0);

    create(&app, json!({"title": "one"})).await;
    create(&app, json!({"title": "two"})).await;

    let (status, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["total_issues"], 2);
}
