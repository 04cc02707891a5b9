//! Mood Analyzer: journal text → MoodAnalysis, never failing
//!
//! One completion call per analysis, bounded by a timeout. Every failure
//! (transport, timeout, format, validation) becomes the neutral fallback.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::completion::{CompletionError, CompletionService};
use crate::core::mood_parser::MoodParser;
use crate::types::{AnalysisReason, AnalysisResult, MoodAnalysis};
use crate::{ANALYSIS_TIMEOUT_SECS, KNOWN_MOODS, MOOD_SCORE_KEYS};

/// Build the analysis prompt for a journal entry
pub fn build_prompt(text: &str) -> String {
    let score_lines: Vec<String> = MOOD_SCORE_KEYS
        .iter()
        .map(|key| format!("  \"{}\": 0.0", key))
        .collect();

    format!(
        "Analyze the following journal entry and provide two things:\n\
         1. A primary mood label (choose one: {moods})\n\
         2. A JSON object containing mood scores from 0.0 to 1.0 for: {keys}\n\
         \n\
         Format your response exactly like this (keep the exact spacing):\n\
         Primary Mood: [mood]\n\
         \n\
         {{\n{scores}\n}}\n\
         \n\
         Journal Entry:\n\
         {text}",
        moods = KNOWN_MOODS.join(", "),
        keys = MOOD_SCORE_KEYS.join(", "),
        scores = score_lines.join(",\n"),
        text = text,
    )
}

/// Map any failure reason to the canonical fallback result
pub fn classify_failure(reason: AnalysisReason) -> AnalysisResult {
    warn!(reason = reason.code(), "Mood analysis failed, using fallback: {}", reason.description());
    AnalysisResult::fallback(reason)
}

/// Mood analysis adapter
#[derive(Clone)]
pub struct MoodAnalyzer {
    service: Arc<dyn CompletionService>,
    parser: MoodParser,
    timeout: Duration,
}

impl std::fmt::Debug for MoodAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodAnalyzer")
            .field("service", &self.service.name())
            .field("parser", &self.parser)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MoodAnalyzer {
    /// Create analyzer with a lenient parser and the default timeout
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self {
            service,
            parser: MoodParser::new(),
            timeout: Duration::from_secs(ANALYSIS_TIMEOUT_SECS),
        }
    }

    pub fn with_parser(mut self, parser: MoodParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Analyze text. Always returns a well-formed result.
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        let prompt = build_prompt(text);

        let completion = match tokio::time::timeout(self.timeout, self.service.complete(&prompt)).await {
            Ok(Ok(completion)) => completion,
            // The HTTP client's own deadline can fire before ours
            Ok(Err(CompletionError::Timeout)) => {
                warn!(service = self.service.name(), timeout_ms = self.timeout.as_millis() as u64, "Completion call timed out in transport");
                return classify_failure(AnalysisReason::R102_TIMEOUT);
            }
            Ok(Err(e)) => {
                warn!(service = self.service.name(), kind = e.kind(), "Completion call failed: {}", e);
                return classify_failure(AnalysisReason::R101_TRANSPORT_FAILURE);
            }
            Err(_) => {
                warn!(service = self.service.name(), timeout_ms = self.timeout.as_millis() as u64, "Completion call timed out");
                return classify_failure(AnalysisReason::R102_TIMEOUT);
            }
        };

        debug!(raw_response = %completion, "Raw mood completion");

        match self.parser.parse(&completion) {
            Ok(analysis) => {
                info!(
                    primary_mood = %analysis.primary_mood,
                    known = analysis.mood().is_some(),
                    "Mood analysis parsed"
                );
                AnalysisResult::success(analysis)
            }
            Err(reason) => {
                debug!(raw_response = %completion, reason = reason.code(), "Unparseable mood completion");
                classify_failure(reason)
            }
        }
    }

    /// Analyze text, dropping the reason code
    pub async fn analyze_mood(&self, text: &str) -> MoodAnalysis {
        self.analyze(text).await.into_analysis()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoodScores;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    enum Reply {
        Text(String),
        Status(u16),
        TimedOut,
    }

    /// Replies with a canned completion, optionally after a delay
    struct ScriptedCompletion {
        reply: Reply,
        delay: Duration,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedCompletion {
        fn text(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Reply::Text(reply.to_string()),
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn status(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Reply::Status(status),
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn timed_out() -> Arc<Self> {
            Arc::new(Self {
                reply: Reply::TimedOut,
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn slow(reply: &str, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                reply: Reply::Text(reply.to_string()),
                delay,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.reply {
                Reply::Text(text) => Ok(text.clone()),
                Reply::Status(status) => Err(CompletionError::from_status(*status, "upstream error")),
                Reply::TimedOut => Err(CompletionError::Timeout),
            }
        }
    }

    const HAPPY: &str = "Primary Mood: happy\n\n{\"happiness\":0.9,\"sadness\":0.1,\"anger\":0.0,\"fear\":0.0,\"joy\":0.8,\"calmness\":0.3}";

    #[test]
    fn test_prompt_contains_contract() {
        let prompt = build_prompt("Walked by the river.");
        assert!(prompt.contains("happy, sad, anxious, calm, angry, joyful, fearful"));
        assert!(prompt.contains("Primary Mood: [mood]"));
        for key in MOOD_SCORE_KEYS {
            assert!(prompt.contains(&format!("\"{}\": 0.0", key)));
        }
        assert!(prompt.ends_with("Journal Entry:\nWalked by the river."));
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let analyzer = MoodAnalyzer::new(ScriptedCompletion::text(HAPPY));
        let result = analyzer.analyze("Great day").await;

        assert_eq!(result.reason, AnalysisReason::R100_ANALYZED);
        assert_eq!(
            result.analysis,
            MoodAnalysis::new(
                "happy",
                MoodScores {
                    happiness: 0.9,
                    sadness: 0.1,
                    anger: 0.0,
                    fear: 0.0,
                    joy: 0.8,
                    calmness: 0.3,
                }
            )
        );
    }

    #[tokio::test]
    async fn test_one_call_per_analysis() {
        let service = ScriptedCompletion::text(HAPPY);
        let analyzer = MoodAnalyzer::new(service.clone());
        analyzer.analyze("Great day").await;

        let prompts = service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("Great day"));
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let analyzer = MoodAnalyzer::new(ScriptedCompletion::status(500));
        let result = analyzer.analyze("anything").await;

        assert_eq!(result, AnalysisResult::fallback(AnalysisReason::R101_TRANSPORT_FAILURE));
        assert_eq!(result.analysis, MoodAnalysis::fallback());
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let analyzer = MoodAnalyzer::new(ScriptedCompletion::slow(HAPPY, Duration::from_secs(5)))
            .with_timeout(Duration::from_millis(50));
        let result = analyzer.analyze("slow day").await;

        assert_eq!(result.reason, AnalysisReason::R102_TIMEOUT);
        assert!(result.analysis.is_fallback());
    }

    #[tokio::test]
    async fn test_transport_timeout_reports_timeout() {
        let analyzer = MoodAnalyzer::new(ScriptedCompletion::timed_out());
        let result = analyzer.analyze("slow day").await;

        assert_eq!(result, AnalysisResult::fallback(AnalysisReason::R102_TIMEOUT));
    }

    #[tokio::test]
    async fn test_odd_completions_keep_result_shape() {
        let replies = [
            "",
            "{}",
            "Primary Mood: sad",
            "Primary Mood: sad\n{\"happiness\":{\"nested\":1},\"sadness\":0.1,\"anger\":0,\"fear\":0,\"joy\":0,\"calmness\":0}",
            "Primary Mood: sad\n{\"happiness\":1e400,\"sadness\":0.1,\"anger\":0,\"fear\":0,\"joy\":0,\"calmness\":0}",
            "Primary Mood: \n{\"happiness\":0.1}",
            "```json\n{\"primaryMood\":\"happy\"}\n```",
            HAPPY,
        ];

        for reply in replies {
            let result = MoodAnalyzer::new(ScriptedCompletion::text(reply)).analyze("x").await;
            let analysis = &result.analysis;

            assert!(!analysis.primary_mood.is_empty(), "empty mood for {:?}", reply);
            for key in MOOD_SCORE_KEYS {
                let score = analysis.mood_scores.get(key);
                assert!(score.is_some_and(f64::is_finite), "bad {} for {:?}", key, reply);
            }
            assert_eq!(result.is_fallback(), reply != HAPPY, "{:?}", reply);
        }
    }

    #[tokio::test]
    async fn test_missing_mood_line_falls_back() {
        let analyzer = MoodAnalyzer::new(ScriptedCompletion::text(
            "{\"happiness\":0.9,\"sadness\":0.1,\"anger\":0.0,\"fear\":0.0,\"joy\":0.8,\"calmness\":0.3}",
        ));
        assert_eq!(analyzer.analyze_mood("x").await, MoodAnalysis::fallback());
    }

    #[tokio::test]
    async fn test_incomplete_scores_fall_back() {
        let analyzer = MoodAnalyzer::new(ScriptedCompletion::text(
            "Primary Mood: sad\n{\"happiness\":0.1,\"sadness\":0.8,\"anger\":0.0,\"fear\":0.2,\"joy\":0.0}",
        ));
        let result = analyzer.analyze("x").await;
        assert_eq!(result, AnalysisResult::fallback(AnalysisReason::R106_INCOMPLETE_SCORES));
    }

    #[tokio::test]
    async fn test_strict_parser_falls_back_on_unknown_mood() {
        let reply = HAPPY.replace("happy", "ecstatic");
        let lenient = MoodAnalyzer::new(ScriptedCompletion::text(&reply));
        let strict = MoodAnalyzer::new(ScriptedCompletion::text(&reply)).with_parser(MoodParser::strict());

        assert_eq!(lenient.analyze_mood("x").await.primary_mood, "ecstatic");
        assert_eq!(strict.analyze("x").await.reason, AnalysisReason::R108_UNKNOWN_MOOD);
    }

    #[tokio::test]
    async fn test_empty_text_is_still_analyzed() {
        let service = ScriptedCompletion::text(HAPPY);
        let analyzer = MoodAnalyzer::new(service.clone());
        let result = analyzer.analyze("").await;

        assert!(!result.is_fallback());
        assert_eq!(service.prompts.lock().unwrap().len(), 1);
    }
}
