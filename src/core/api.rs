//! HTTP API for the journal
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /analyze - Analyze text without saving
//! - GET /entries?mood= - List entries (newest first)
//! - POST /entries - Create entry
//! - GET /entries/:id - Get entry
//! - PUT /entries/:id - Edit entry (re-analyzes)
//! - DELETE /entries/:id - Delete entry
//! - GET /moods - Mood counts
//!
//! The caller's identity is the `x-user-id` header set by the identity
//! provider in front of this service.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::journal::{Journal, JournalError};
use crate::types::{AnalysisReason, JournalEntry, MoodCount, MoodScores};

/// Header carrying the authenticated user id
pub const USER_HEADER: &str = "x-user-id";

/// App state
pub struct AppState {
    pub journal: Journal,
}

/// Analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Analyze response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub primary_mood: String,
    pub mood_scores: MoodScores,
    pub reason: AnalysisReason,
    pub fallback: bool,
}

/// Create / edit entry request
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub content: String,
}

/// List query
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub mood: Option<String>,
}

/// Mood counts response
#[derive(Debug, Serialize)]
pub struct MoodsResponse {
    pub total: usize,
    pub moods: Vec<MoodCount>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub entries_stored: usize,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for JournalError {
    fn into_response(self) -> Response {
        let status = match self {
            JournalError::Unauthenticated => StatusCode::UNAUTHORIZED,
            JournalError::EmptyContent => StatusCode::BAD_REQUEST,
            JournalError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Create the API router
pub fn create_router(journal: Journal) -> Router {
    let state = Arc::new(AppState { journal });

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/:id", get(get_entry).put(update_entry).delete(delete_entry))
        .route("/moods", get(mood_counts))
        .with_state(state)
}

/// Authenticated user id from headers
fn user_id(headers: &HeaderMap) -> Result<String, JournalError> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(JournalError::Unauthenticated)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        entries_stored: state.journal.store().len().await,
    })
}

/// Analyze text without saving
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let result = state.journal.analyze(&req.text).await;
    Json(AnalyzeResponse {
        fallback: result.is_fallback(),
        reason: result.reason,
        primary_mood: result.analysis.primary_mood,
        mood_scores: result.analysis.mood_scores,
    })
}

/// List entries, optionally filtered by mood
async fn list_entries(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<JournalEntry>>, JournalError> {
    let user = user_id(&headers)?;
    let mood = query.mood.as_deref().map(str::trim).filter(|m| !m.is_empty());
    let entries = state.journal.list_entries(&user, mood).await?;
    Ok(Json(entries))
}

/// Create entry
async fn create_entry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<EntryRequest>,
) -> Result<(StatusCode, Json<JournalEntry>), JournalError> {
    let user = user_id(&headers)?;
    let entry = state.journal.create_entry(&user, &req.content).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Get entry
async fn get_entry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<JournalEntry>, JournalError> {
    let user = user_id(&headers)?;
    Ok(Json(state.journal.get_entry(&user, id).await?))
}

/// Edit entry
async fn update_entry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<EntryRequest>,
) -> Result<Json<JournalEntry>, JournalError> {
    let user = user_id(&headers)?;
    Ok(Json(state.journal.update_entry(&user, id, &req.content).await?))
}

/// Delete entry
async fn delete_entry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JournalError> {
    let user = user_id(&headers)?;
    state.journal.delete_entry(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mood counts over all of the user's entries
async fn mood_counts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MoodsResponse>, JournalError> {
    let user = user_id(&headers)?;
    let moods = state.journal.mood_counts(&user).await?;
    Ok(Json(MoodsResponse {
        total: moods.iter().map(|m| m.count).sum(),
        moods,
    }))
}

/// Run the API server
pub async fn run_server(addr: &str, journal: Journal) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(journal);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "moodjournal API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
