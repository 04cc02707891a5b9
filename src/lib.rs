//! moodjournal: journaling service with LLM mood tagging
//!
//! Entry text → MoodAnalyzer (Gemini completion + MoodParser) → EntryStore

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// MOOD DIMENSIONS
// =============================================================================

/// Score keys every valid mood analysis must carry
pub const MOOD_SCORE_KEYS: [&str; 6] = ["happiness", "sadness", "anger", "fear", "joy", "calmness"];

/// Labels the model is asked to choose from
pub const KNOWN_MOODS: [&str; 7] = ["happy", "sad", "anxious", "calm", "angry", "joyful", "fearful"];

// =============================================================================
// FALLBACK [C] - returned on every analysis failure
// =============================================================================

/// Primary mood used when analysis fails
pub const FALLBACK_MOOD: &str = "neutral";

/// Score assigned to every dimension when analysis fails
pub const FALLBACK_SCORE: f64 = 0.5;

// =============================================================================
// UPSTREAM MODEL [C]
// =============================================================================

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-002";

/// Default Gemini REST base url
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sampling temperature (high, creative)
pub const TEMPERATURE: f64 = 0.9;

/// Top-k sampling (1 = near-greedy)
pub const TOP_K: u32 = 1;

/// Nucleus sampling
pub const TOP_P: f64 = 1.0;

/// Output token cap
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Threshold applied to all four safety categories
pub const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Upper bound on one analysis call (seconds)
pub const ANALYSIS_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
