//! Client for a remote completion API that explains the training procedure.
//!
//! It has no numeric coupling to the optimizer. The binary calls it after
//! training, with the fixed [`ALGORITHM_PROMPT`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub const ALGORITHM_PROMPT: &str = "\
I'm implementing gradient descent for linear regression with the following setup:

Hypothesis: h(x) = θ₀ + θ₁·x
Cost function: J(θ) = (1/2m) Σ(h(xᵢ) - yᵢ)²

I derived these gradient formulas:
∂J/∂θ₀ = (1/m) Σ(h(xᵢ) - yᵢ)
∂J/∂θ₁ = (1/m) Σ(h(xᵢ) - yᵢ) · xᵢ

Please explain the algorithm I used in a concise, yet detailed manner.
";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_version: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1000,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("API key required: set the {0} environment variable")]
    MissingApiKey(String),
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("response contained no text content")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl MessageResponse {
    fn into_first_text(self) -> Option<String> {
        self.content.into_iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
    }
}

pub struct ExplanationClient {
    http: reqwest::Client,
    config: ExplainConfig,
    api_key: String,
}

impl ExplanationClient {
    pub fn new(config: ExplainConfig, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_key: api_key.into(),
        }
    }

    /// Reads the key from `config.api_key_env`.
    pub fn from_env(config: ExplainConfig) -> Result<Self, ExplainError> {
        match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(config, key)),
            _ => Err(ExplainError::MissingApiKey(config.api_key_env)),
        }
    }

    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> MessageRequest<'a> {
        MessageRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        }
    }

    /// Sends `prompt` as a single user message and returns the first text
    /// block of the reply.
    pub async fn explain(&self, prompt: &str) -> Result<String, ExplainError> {
        log::debug!(
            "requesting explanation from {} (model {})",
            self.config.endpoint,
            self.config.model
        );
        let response = self
            .http
            .post(&self.config.endpoint)
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", self.config.api_version.as_str())
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(ExplainError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessageResponse = response.json().await?;
        parsed.into_first_text().ok_or(ExplainError::EmptyResponse)
    }
}
