//! Core types for moodjournal

mod reason;
mod mood;
mod scores;
mod analysis;
mod entry;
mod output;

pub use reason::AnalysisReason;
pub use mood::Mood;
pub use scores::MoodScores;
pub use analysis::{MoodAnalysis, AnalysisResult};
pub use entry::{JournalEntry, MoodCount};
pub use output::AnalysisOutput;
