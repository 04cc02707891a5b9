//! Mood response parser
//!
//! Expected completion grammar:
//!
//! ```text
//! Primary Mood: <word>
//!
//! { "happiness": n, "sadness": n, "anger": n, "fear": n, "joy": n, "calmness": n }
//! ```
//!
//! The label line and the first `{...}` span are extracted independently, so
//! prose around them is tolerated.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use crate::MOOD_SCORE_KEYS;
use crate::types::{AnalysisReason, Mood, MoodAnalysis, MoodScores};

lazy_static! {
    // "Primary Mood:" label, any case, whitespace (including newlines) before the word
    static ref RE_PRIMARY_MOOD: Regex = Regex::new(
        r"(?i)Primary Mood:\s*([A-Za-z0-9_]+)"
    ).unwrap();

    // First minimal {...} span; nested objects are not supported
    static ref RE_JSON_BLOCK: Regex = Regex::new(
        r"(?s)\{.*?\}"
    ).unwrap();
}

/// Left/right double quotation marks the model sometimes emits
const SMART_QUOTES: [char; 2] = ['\u{201C}', '\u{201D}'];

/// Parser for mood completions
#[derive(Debug, Default, Clone, Copy)]
pub struct MoodParser {
    /// Reject labels outside the seven offered moods
    strict: bool,
}

impl MoodParser {
    /// Lenient parser: any word after "Primary Mood:" is accepted
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Strict parser: label must be one of the seven offered moods
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn with_strict(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parse a full completion into an analysis, or the reason it failed
    pub fn parse(&self, response: &str) -> Result<MoodAnalysis, AnalysisReason> {
        let response = response.trim();

        let primary_mood = extract_primary_mood(response)
            .ok_or(AnalysisReason::R103_MISSING_MOOD_LINE)?;

        if self.strict && !Mood::from_label(&primary_mood).is_some_and(|m| m.is_offered()) {
            return Err(AnalysisReason::R108_UNKNOWN_MOOD);
        }

        let block = extract_json_block(response)
            .ok_or(AnalysisReason::R104_MISSING_JSON_BLOCK)?;

        let mood_scores = parse_scores(&normalize_quotes(block))?;

        Ok(MoodAnalysis::new(primary_mood, mood_scores))
    }
}

/// Lowercased word following "Primary Mood:"
pub fn extract_primary_mood(response: &str) -> Option<String> {
    RE_PRIMARY_MOOD
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// First `{...}` span in the response
pub fn extract_json_block(response: &str) -> Option<&str> {
    RE_JSON_BLOCK.find(response).map(|m| m.as_str())
}

/// Replace smart double quotes with plain ones
pub fn normalize_quotes(block: &str) -> String {
    block.replace(&SMART_QUOTES[..], "\"")
}

/// Parse a JSON object and validate the six score keys
pub fn parse_scores(json: &str) -> Result<MoodScores, AnalysisReason> {
    let value: Value = serde_json::from_str(json)
        .map_err(|_| AnalysisReason::R105_MALFORMED_JSON)?;
    let object = value
        .as_object()
        .ok_or(AnalysisReason::R105_MALFORMED_JSON)?;

    let missing = missing_keys(object);
    if !missing.is_empty() {
        return Err(AnalysisReason::R106_INCOMPLETE_SCORES);
    }

    let score = |key: &str| -> Result<f64, AnalysisReason> {
        object
            .get(key)
            .and_then(Value::as_f64)
            .ok_or(AnalysisReason::R107_NON_NUMERIC_SCORE)
    };

    Ok(MoodScores {
        happiness: score("happiness")?,
        sadness: score("sadness")?,
        anger: score("anger")?,
        fear: score("fear")?,
        joy: score("joy")?,
        calmness: score("calmness")?,
    })
}

/// Required score keys absent from the object
pub fn missing_keys(object: &Map<String, Value>) -> Vec<&'static str> {
    MOOD_SCORE_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
