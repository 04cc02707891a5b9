//! Journal entry records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::types::{MoodAnalysis, MoodScores};

/// A stored journal entry, owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub content: String,
    /// Primary mood label from analysis
    pub mood: String,
    pub mood_score: MoodScores,
}

impl JournalEntry {
    /// Create a new entry tagged with an analysis
    pub fn new(user_id: impl Into<String>, content: impl Into<String>, analysis: MoodAnalysis) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
            content: content.into(),
            mood: analysis.primary_mood,
            mood_score: analysis.mood_scores,
        }
    }

    /// Replace content and mood tags (last write wins)
    pub fn revise(&mut self, content: impl Into<String>, analysis: MoodAnalysis) {
        self.content = content.into();
        self.mood = analysis.primary_mood;
        self.mood_score = analysis.mood_scores;
        self.updated_at = Utc::now();
    }

    /// First line of the content, cut to `max_chars`
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.content.lines().next().unwrap_or("");
        if first_line.chars().count() > max_chars {
            let cut: String = first_line.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            first_line.to_string()
        }
    }
}

/// Number of entries per mood label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: usize,
}
