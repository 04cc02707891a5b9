//! Integration tests for the HTTP API
//!
//! Router → Journal → MoodAnalyzer, with a keyword-driven completion service

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use moodjournal::core::{create_router, CompletionError, CompletionService, Journal, MoodAnalyzer};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Answers "sad" for entries mentioning rain, fails for "offline", else "happy"
struct KeywordCompletion;

#[async_trait]
impl CompletionService for KeywordCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let entry = prompt.rsplit("Journal Entry:\n").next().unwrap_or("");
        if entry.contains("offline") {
            return Err(CompletionError::Network("connection refused".to_string()));
        }
        let mood = if entry.contains("rain") { "sad" } else { "happy" };
        Ok(format!(
            "Primary Mood: {}\n\n{{\"happiness\":0.6,\"sadness\":0.4,\"anger\":0.0,\"fear\":0.1,\"joy\":0.5,\"calmness\":0.2}}",
            mood
        ))
    }
}

fn create_test_router() -> Router {
    let analyzer = MoodAnalyzer::new(Arc::new(KeywordCompletion));
    create_router(Journal::new(analyzer))
}

fn request(method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["entries_stored"], 0);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_analyze_endpoint() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        request("POST", "/analyze", None, Some(serde_json::json!({ "text": "Listening to the rain" }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["primaryMood"], "sad");
    assert_eq!(json["moodScores"]["sadness"], 0.4);
    assert_eq!(json["reason"], "R100_ANALYZED");
    assert_eq!(json["fallback"], false);
}

#[tokio::test]
async fn test_analyze_endpoint_fallback() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        request("POST", "/analyze", None, Some(serde_json::json!({ "text": "offline today" }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["primaryMood"], "neutral");
    assert_eq!(json["moodScores"]["joy"], 0.5);
    assert_eq!(json["reason"], "R101_TRANSPORT_FAILURE");
    assert_eq!(json["fallback"], true);
}

#[tokio::test]
async fn test_entries_require_user() {
    let app = create_test_router();
    let (status, _) = send(&app, request("GET", "/entries", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, request("GET", "/entries", Some("   "), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_entry_rejected() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        request("POST", "/entries", Some("alice"), Some(serde_json::json!({ "content": "  \n " }))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_full_entry_flow() {
    let app = create_test_router();

    // Create two entries
    let (status, sunny) = send(
        &app,
        request("POST", "/entries", Some("alice"), Some(serde_json::json!({ "content": "Sunny walk" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sunny["mood"], "happy");
    assert_eq!(sunny["user_id"], "alice");
    let sunny_id = sunny["id"].as_str().unwrap().to_string();

    let (status, rainy) = send(
        &app,
        request("POST", "/entries", Some("alice"), Some(serde_json::json!({ "content": "Cold rain" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rainy["mood"], "sad");
    assert_eq!(rainy["mood_score"]["fear"], 0.1);

    // Filter by mood
    let (status, list) = send(&app, request("GET", "/entries?mood=sad", Some("alice"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["content"], "Cold rain");

    let (_, all) = send(&app, request("GET", "/entries", Some("alice"), None)).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    // Other users see nothing
    let (status, _) = send(&app, request("GET", &format!("/entries/{}", sunny_id), Some("bob"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Edit re-analyzes
    let (status, edited) = send(
        &app,
        request(
            "PUT",
            &format!("/entries/{}", sunny_id),
            Some("alice"),
            Some(serde_json::json!({ "content": "Then the rain came" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["mood"], "sad");
    assert_eq!(edited["content"], "Then the rain came");

    // Mood counts over all entries
    let (status, moods) = send(&app, request("GET", "/moods", Some("alice"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moods["total"], 2);
    assert_eq!(moods["moods"][0]["mood"], "sad");
    assert_eq!(moods["moods"][0]["count"], 2);

    // Delete
    let (status, _) = send(&app, request("DELETE", &format!("/entries/{}", sunny_id), Some("alice"), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, request("GET", &format!("/entries/{}", sunny_id), Some("alice"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, request("DELETE", &format!("/entries/{}", sunny_id), Some("alice"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_entry_saved_when_analysis_fails() {
    let app = create_test_router();
    let (status, entry) = send(
        &app,
        request("POST", "/entries", Some("alice"), Some(serde_json::json!({ "content": "Wrote this offline" }))),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["mood"], "neutral");
    assert_eq!(entry["mood_score"]["calmness"], 0.5);
}

#[tokio::test]
async fn test_unknown_entry_id() {
    let app = create_test_router();
    let (status, _) = send(
        &app,
        request("GET", "/entries/00000000-0000-0000-0000-000000000000", Some("alice"), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
