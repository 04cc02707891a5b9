//! Reason codes for mood analysis outcomes

use serde::{Deserialize, Serialize};

/// Why an analysis produced the value it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum AnalysisReason {
    // =========================================================================
    // R100: Success
    // =========================================================================
    /// Mood line and score block parsed and validated
    R100_ANALYZED,

    // =========================================================================
    // R101-R102: Upstream call
    // =========================================================================
    /// Completion call failed (network, HTTP status, bad envelope, no text)
    R101_TRANSPORT_FAILURE,
    /// Completion call exceeded the analysis timeout
    R102_TIMEOUT,

    // =========================================================================
    // R103-R105: Response format
    // =========================================================================
    /// No "Primary Mood:" line in the completion
    R103_MISSING_MOOD_LINE,
    /// No {...} span in the completion
    R104_MISSING_JSON_BLOCK,
    /// {...} span is not valid JSON
    R105_MALFORMED_JSON,

    // =========================================================================
    // R106-R108: Validation
    // =========================================================================
    /// One or more of the six score keys is missing
    R106_INCOMPLETE_SCORES,
    /// A score key is present but not a number
    R107_NON_NUMERIC_SCORE,
    /// Mood label outside the known set (strict mode only)
    R108_UNKNOWN_MOOD,
}

impl AnalysisReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R100_ANALYZED => "R100_ANALYZED",
            Self::R101_TRANSPORT_FAILURE => "R101_TRANSPORT_FAILURE",
            Self::R102_TIMEOUT => "R102_TIMEOUT",
            Self::R103_MISSING_MOOD_LINE => "R103_MISSING_MOOD_LINE",
            Self::R104_MISSING_JSON_BLOCK => "R104_MISSING_JSON_BLOCK",
            Self::R105_MALFORMED_JSON => "R105_MALFORMED_JSON",
            Self::R106_INCOMPLETE_SCORES => "R106_INCOMPLETE_SCORES",
            Self::R107_NON_NUMERIC_SCORE => "R107_NON_NUMERIC_SCORE",
            Self::R108_UNKNOWN_MOOD => "R108_UNKNOWN_MOOD",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R100_ANALYZED => "Mood analyzed",
            Self::R101_TRANSPORT_FAILURE => "Completion service call failed",
            Self::R102_TIMEOUT => "Completion service timed out",
            Self::R103_MISSING_MOOD_LINE => "Could not find primary mood in response",
            Self::R104_MISSING_JSON_BLOCK => "Could not find mood scores JSON in response",
            Self::R105_MALFORMED_JSON => "Invalid mood scores JSON format",
            Self::R106_INCOMPLETE_SCORES => "Missing required mood scores",
            Self::R107_NON_NUMERIC_SCORE => "Mood score is not a number",
            Self::R108_UNKNOWN_MOOD => "Primary mood is not a known mood",
        }
    }

    /// Did the analysis fall back to the neutral result?
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::R100_ANALYZED)
    }
}

impl std::fmt::Display for AnalysisReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_analyzed_is_success() {
        assert!(!AnalysisReason::R100_ANALYZED.is_failure());
        assert!(AnalysisReason::R101_TRANSPORT_FAILURE.is_failure());
        assert!(AnalysisReason::R106_INCOMPLETE_SCORES.is_failure());
    }

    #[test]
    fn test_display_includes_code() {
        let text = AnalysisReason::R103_MISSING_MOOD_LINE.to_string();
        assert!(text.starts_with("R103_MISSING_MOOD_LINE: "));
    }
}
