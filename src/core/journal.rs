//! Journal: per-user entry store plus the analyze-then-save workflow
//!
//! Every read and write is scoped by user id; another user's entry behaves
//! exactly like a missing one. Concurrent updates of one entry are last
//! write wins.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::core::analyzer::MoodAnalyzer;
use crate::types::{AnalysisResult, JournalEntry, MoodAnalysis, MoodCount};

/// Journal operation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    /// No user id supplied by the identity provider
    #[error("user is not authenticated")]
    Unauthenticated,

    /// Blank or whitespace-only content
    #[error("journal entry content must not be empty")]
    EmptyContent,

    /// Entry missing or owned by another user
    #[error("journal entry {0} not found")]
    NotFound(Uuid),
}

// =============================================================================
// STORE
// =============================================================================

/// In-memory entry store
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: RwLock<HashMap<Uuid, JournalEntry>>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new entry
    pub async fn insert(&self, user_id: &str, content: &str, analysis: MoodAnalysis) -> JournalEntry {
        let entry = JournalEntry::new(user_id, content, analysis);
        self.entries.write().await.insert(entry.id, entry.clone());
        entry
    }

    /// User's entries, newest first, optionally restricted to one mood
    pub async fn list(&self, user_id: &str, mood: Option<&str>) -> Vec<JournalEntry> {
        let entries = self.entries.read().await;
        let mut found: Vec<JournalEntry> = entries
            .values()
            .filter(|e| e.user_id == user_id)
            .filter(|e| mood.map_or(true, |m| e.mood == m))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        found
    }

    pub async fn get(&self, user_id: &str, id: Uuid) -> Option<JournalEntry> {
        self.entries
            .read()
            .await
            .get(&id)
            .filter(|e| e.user_id == user_id)
            .cloned()
    }

    /// Replace content and mood tags of an owned entry
    pub async fn update(&self, user_id: &str, id: Uuid, content: &str, analysis: MoodAnalysis) -> Option<JournalEntry> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).filter(|e| e.user_id == user_id)?;
        entry.revise(content, analysis);
        Some(entry.clone())
    }

    /// Delete an owned entry; false if missing or not owned
    pub async fn remove(&self, user_id: &str, id: Uuid) -> bool {
        let mut entries = self.entries.write().await;
        let owned = entries.get(&id).is_some_and(|e| e.user_id == user_id);
        if owned {
            entries.remove(&id);
        }
        owned
    }

    /// Entries per mood over all of the user's entries
    pub async fn mood_counts(&self, user_id: &str) -> Vec<MoodCount> {
        let entries = self.entries.read().await;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in entries.values().filter(|e| e.user_id == user_id) {
            *counts.entry(entry.mood.as_str()).or_insert(0) += 1;
        }

        let mut counts: Vec<MoodCount> = counts
            .into_iter()
            .map(|(mood, count)| MoodCount {
                mood: mood.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.mood.cmp(&b.mood)));
        counts
    }

    /// Total entries across all users
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// Journal service: validates content, analyzes mood, persists
#[derive(Debug, Clone)]
pub struct Journal {
    analyzer: MoodAnalyzer,
    store: Arc<EntryStore>,
}

impl Journal {
    pub fn new(analyzer: MoodAnalyzer) -> Self {
        Self::with_store(analyzer, Arc::new(EntryStore::new()))
    }

    pub fn with_store(analyzer: MoodAnalyzer, store: Arc<EntryStore>) -> Self {
        Self { analyzer, store }
    }

    pub fn analyzer(&self) -> &MoodAnalyzer {
        &self.analyzer
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Analyze text without saving
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        self.analyzer.analyze(text).await
    }

    /// Analyze and save a new entry. Analysis failures still save (neutral tag).
    pub async fn create_entry(&self, user_id: &str, content: &str) -> Result<JournalEntry, JournalError> {
        check_user(user_id)?;
        check_content(content)?;

        let result = self.analyzer.analyze(content).await;
        let entry = self.store.insert(user_id, content, result.analysis).await;
        info!(entry_id = %entry.id, mood = %entry.mood, reason = result.reason.code(), "Journal entry created");
        Ok(entry)
    }

    /// Re-analyze and overwrite an entry's content
    pub async fn update_entry(&self, user_id: &str, id: Uuid, content: &str) -> Result<JournalEntry, JournalError> {
        check_user(user_id)?;
        check_content(content)?;

        // Ownership first so foreign ids never reach the model
        if self.store.get(user_id, id).await.is_none() {
            return Err(JournalError::NotFound(id));
        }

        let result = self.analyzer.analyze(content).await;
        let entry = self
            .store
            .update(user_id, id, content, result.analysis)
            .await
            .ok_or(JournalError::NotFound(id))?;
        info!(entry_id = %entry.id, mood = %entry.mood, reason = result.reason.code(), "Journal entry updated");
        Ok(entry)
    }

    pub async fn get_entry(&self, user_id: &str, id: Uuid) -> Result<JournalEntry, JournalError> {
        check_user(user_id)?;
        self.store.get(user_id, id).await.ok_or(JournalError::NotFound(id))
    }

    pub async fn list_entries(&self, user_id: &str, mood: Option<&str>) -> Result<Vec<JournalEntry>, JournalError> {
        check_user(user_id)?;
        Ok(self.store.list(user_id, mood).await)
    }

    pub async fn delete_entry(&self, user_id: &str, id: Uuid) -> Result<(), JournalError> {
        check_user(user_id)?;
        if self.store.remove(user_id, id).await {
            info!(entry_id = %id, "Journal entry deleted");
            Ok(())
        } else {
            Err(JournalError::NotFound(id))
        }
    }

    pub async fn mood_counts(&self, user_id: &str) -> Result<Vec<MoodCount>, JournalError> {
        check_user(user_id)?;
        Ok(self.store.mood_counts(user_id).await)
    }
}

fn check_user(user_id: &str) -> Result<(), JournalError> {
    if user_id.trim().is_empty() {
        Err(JournalError::Unauthenticated)
    } else {
        Ok(())
    }
}

fn check_content(content: &str) -> Result<(), JournalError> {
    if content.trim().is_empty() {
        Err(JournalError::EmptyContent)
    } else {
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
