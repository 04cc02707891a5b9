//! Mood analysis results
//!
//! `MoodAnalysis` is the value persisted on entries. `AnalysisResult` pairs it
//! with the reason code explaining how it was produced.

use serde::{Deserialize, Serialize};
use crate::{FALLBACK_MOOD, FALLBACK_SCORE};
use crate::types::{AnalysisReason, Mood, MoodScores};

/// Primary mood plus the six-dimension score vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysis {
    /// Lowercased label; may be outside the known set in lenient mode
    pub primary_mood: String,
    pub mood_scores: MoodScores,
}

impl MoodAnalysis {
    /// Create a new analysis
    pub fn new(primary_mood: impl Into<String>, mood_scores: MoodScores) -> Self {
        Self {
            primary_mood: primary_mood.into(),
            mood_scores,
        }
    }

    /// The canonical fallback: neutral, every score 0.5
    pub fn fallback() -> Self {
        Self::new(FALLBACK_MOOD, MoodScores::uniform(FALLBACK_SCORE))
    }

    /// Known mood for the label, if any
    pub fn mood(&self) -> Option<Mood> {
        Mood::from_label(&self.primary_mood)
    }

    /// Equal to the fallback value
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// Outcome of one analysis call: always carries a usable analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: MoodAnalysis,
    pub reason: AnalysisReason,
}

impl AnalysisResult {
    /// Create a successful result
    pub fn success(analysis: MoodAnalysis) -> Self {
        Self {
            analysis,
            reason: AnalysisReason::R100_ANALYZED,
        }
    }

    /// Create a fallback result for a failure reason
    pub fn fallback(reason: AnalysisReason) -> Self {
        Self {
            analysis: MoodAnalysis::fallback(),
            reason,
        }
    }

    /// Did analysis fail and fall back?
    pub fn is_fallback(&self) -> bool {
        self.reason.is_failure()
    }

    pub fn into_analysis(self) -> MoodAnalysis {
        self.analysis
    }
}
