//! Completion service seam
//!
//! The analyzer only needs "prompt in, text out"; Gemini is one implementation.

use async_trait::async_trait;
use thiserror::Error;

/// Bodies longer than this are cut in error messages
const MAX_ERROR_BODY: usize = 300;

/// Why a completion call failed
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("network error: {0}")]
    Network(String),

    /// Transport-level timeout
    #[error("request timed out")]
    Timeout,

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected envelope
    #[error("malformed response: {0}")]
    MalformedBody(String),

    /// No candidate text (blocked by safety filters or empty)
    #[error("empty completion: {0}")]
    EmptyCompletion(String),

    /// HTTP client could not be constructed
    #[error("client setup failed: {0}")]
    Client(String),
}

impl CompletionError {
    /// Build a status error with a truncated body
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: truncate_body(body),
        }
    }

    /// Classify a reqwest error
    pub fn network(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Kind label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Timeout => "timeout",
            Self::Status { .. } => "status",
            Self::MalformedBody(_) => "malformed_body",
            Self::EmptyCompletion(_) => "empty_completion",
            Self::Client(_) => "client",
        }
    }
}

/// Single-shot text completion
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send one prompt, return the completion text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Name for logs
    fn name(&self) -> &str {
        "completion"
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY {
        let cut: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
