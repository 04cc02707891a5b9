//! Core modules for moodjournal

pub mod mood_parser;
pub mod completion;
pub mod gemini;
pub mod analyzer;
pub mod journal;
pub mod api;

pub use mood_parser::MoodParser;
pub use completion::{CompletionService, CompletionError};
pub use gemini::GeminiClient;
pub use analyzer::{MoodAnalyzer, build_prompt, classify_failure};
pub use journal::{Journal, EntryStore, JournalError};
pub use api::{create_router, run_server};
