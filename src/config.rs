//! Runtime configuration
//!
//! Built by the CLI from flags and environment (`GEMINI_API_KEY`,
//! `GEMINI_MODEL`, `GEMINI_BASE_URL`); defaults come from crate constants.

use std::time::Duration;
use crate::{ANALYSIS_TIMEOUT_SECS, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Upstream and analysis settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini access credential; analysis falls back when absent
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Upper bound on one analysis call
    pub timeout: Duration,
    /// Reject mood labels outside the seven offered moods
    pub strict_moods: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(ANALYSIS_TIMEOUT_SECS),
            strict_moods: false,
        }
    }
}

impl Config {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}
