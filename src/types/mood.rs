//! Mood labels

use colored::Color;
use serde::{Deserialize, Serialize};

/// The moods the analyzer asks the model to choose from, plus the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Calm,
    Angry,
    Joyful,
    Fearful,
    /// Fallback when analysis fails
    Neutral,
}

impl Mood {
    /// Look up a label, case-insensitive. Unknown labels return None.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "happy" => Some(Mood::Happy),
            "sad" => Some(Mood::Sad),
            "anxious" => Some(Mood::Anxious),
            "calm" => Some(Mood::Calm),
            "angry" => Some(Mood::Angry),
            "joyful" => Some(Mood::Joyful),
            "fearful" => Some(Mood::Fearful),
            "neutral" => Some(Mood::Neutral),
            _ => None,
        }
    }

    /// Lowercase label as stored on entries
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Calm => "calm",
            Mood::Angry => "angry",
            Mood::Joyful => "joyful",
            Mood::Fearful => "fearful",
            Mood::Neutral => "neutral",
        }
    }

    /// One of the seven labels offered to the model (neutral is not)
    pub fn is_offered(&self) -> bool {
        !matches!(self, Mood::Neutral)
    }

    /// Terminal color for a mood
    pub fn color(&self) -> Color {
        match self {
            Mood::Happy => Color::Yellow,
            Mood::Sad => Color::Blue,
            Mood::Anxious => Color::Magenta,
            Mood::Calm => Color::Cyan,
            Mood::Angry => Color::Red,
            Mood::Joyful => Color::Green,
            Mood::Fearful => Color::BrightMagenta,
            Mood::Neutral => Color::BrightBlack,
        }
    }

    /// Color for any stored label; unrecognized labels render gray
    pub fn color_for_label(label: &str) -> Color {
        Self::from_label(label)
            .map(|m| m.color())
            .unwrap_or(Color::BrightBlack)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
