//! Chat-completion client for the LLM enrichment call.
//!
//! The enricher talks to the model through the [`ChatCompletion`] trait so
//! tests can substitute a double. The production implementation,
//! [`OpenAiChat`], posts a single JSON-mode chat completion: temperature
//! 0.7, bounded max tokens, no streaming, no tool use, and no retries —
//! any failure here routes the enricher onto its fallback path.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

/// Errors from the chat-completion call. All of them are recoverable:
/// the enricher converts every variant into its fallback path.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("chat completion transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat completion API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("chat completion returned no content")]
    Empty,
}

/// One chat completion: a system persona and a user payload in, the
/// assistant's message content out.
pub trait ChatCompletion {
    /// Send a single JSON-mode completion request.
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// Production [`ChatCompletion`] backed by the OpenAI chat completions
/// endpoint (or any compatible server).
#[derive(Debug, Clone)]
pub struct OpenAiChat {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl OpenAiChat {
    /// Build a client for the given credential and model id.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, which only
    /// happens in broken build environments.
    pub fn new(api_key: String, model: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            api_key,
            model,
            base_url: OPENAI_API_URL.to_string(),
        }
    }
}

impl ChatCompletion for OpenAiChat {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, "Chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::Empty)
    }
}
