//! Output structures for terminal display

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use crate::types::{AnalysisReason, AnalysisResult, Mood, MoodScores};

/// Output structure for each analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    pub primary_mood: String,
    pub mood_scores: MoodScores,
    /// Reason for the outcome
    pub reason: AnalysisReason,
    /// Was the fallback returned?
    pub fallback: bool,
}

impl AnalysisOutput {
    /// Create output from a result
    pub fn new(result: &AnalysisResult) -> Self {
        Self {
            timestamp: Utc::now(),
            primary_mood: result.analysis.primary_mood.clone(),
            mood_scores: result.analysis.mood_scores,
            reason: result.reason,
            fallback: result.is_fallback(),
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = Mood::color_for_label(&self.primary_mood);
        let (top_key, top_value) = self.mood_scores.dominant();
        format!(
            "{} | top={}:{:.2} | {}",
            format!("mood={}", self.primary_mood).color(color).bold(),
            top_key,
            top_value,
            self.reason.code().dimmed()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let scores: Vec<String> = self
            .mood_scores
            .iter()
            .map(|(key, v)| format!("{}={:.2}", key, v))
            .collect();
        format!(
            "mood={} | {} | reason={}",
            self.primary_mood,
            scores.join(" "),
            self.reason.code()
        )
    }
}
