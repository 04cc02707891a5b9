//! Gemini `generateContent` client
//!
//! One request per prompt: a single user turn, fixed sampling, and the four
//! safety categories at BLOCK_MEDIUM_AND_ABOVE. Only the first candidate's
//! non-thought text parts are returned.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::core::completion::{CompletionError, CompletionService};
use crate::{MAX_OUTPUT_TOKENS, SAFETY_THRESHOLD, TEMPERATURE, TOP_K, TOP_P};

/// Safety categories filtered on every request
pub const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

// =============================================================================
// REQUEST BODY
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

impl GenerateContentRequest {
    /// Single user turn with the fixed generation and safety settings
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt.to_string() }],
            }],
            generation_config: GenerationConfig::default(),
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Gemini REST client
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GeminiClient {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    /// generateContent url for the configured model
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CompletionError::Client("GEMINI_API_KEY is not set".to_string()));
        };

        let url = self.endpoint();
        info!(model = %self.model, url_prefix = %self.base_url, "Calling Gemini generateContent");

        // Header auth keeps the key out of urls and logs
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::for_prompt(prompt))
            .send()
            .await
            .map_err(|e| {
                error!("Gemini HTTP request failed: {}", e);
                CompletionError::network(&e)
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            error!("Failed to read Gemini response body: {}", e);
            CompletionError::network(&e)
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error: {}", text);
            return Err(CompletionError::from_status(status.as_u16(), &text));
        }

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse Gemini response JSON: {}", e);
            CompletionError::MalformedBody(e.to_string())
        })?;

        extract_text(&data)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Concatenate the first candidate's text parts, skipping thought parts
pub fn extract_text(data: &Value) -> Result<String, CompletionError> {
    let block_reason = data
        .get("promptFeedback")
        .and_then(|pf| pf.get("blockReason"))
        .and_then(Value::as_str);

    let Some(candidate) = data.get("candidates").and_then(|c| c.get(0)) else {
        warn!(prompt_block_reason = block_reason.unwrap_or(""), "Gemini returned no candidates");
        let note = match block_reason {
            Some(reason) => format!("prompt blocked ({})", reason),
            None => "no candidates returned by provider".to_string(),
        };
        return Err(CompletionError::EmptyCompletion(note));
    };

    let finish_reason = candidate.get("finishReason").and_then(Value::as_str);

    let text: String = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        debug!(finish_reason = finish_reason.unwrap_or(""), "Gemini candidate had no text");
        let note = match finish_reason {
            Some(reason) => format!("finish reason: {}", reason),
            None => "candidate had no text parts".to_string(),
        };
        return Err(CompletionError::EmptyCompletion(note));
    }

    Ok(text)
}
