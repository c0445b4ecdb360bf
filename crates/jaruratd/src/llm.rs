//! Chat completion client for the AI triage provider.
//!
//! Speaks the OpenAI-compatible `/chat/completions` API (Groq by default).
//! The provider sits behind a trait so the reconciler can be driven by
//! scripted providers in tests.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::AiConfig;

/// LLM errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("AI provider is disabled in configuration")]
    Disabled,

    #[error("Missing API key (set {0})")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Provider returned empty response")]
    EmptyResponse,
}

/// One chat completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider for a JSON object response
    pub json_mode: bool,
}

/// Chat completion provider
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Tag recorded as `aiProvider` when this provider's output is used
    fn tag(&self) -> &str;

    /// Raw text content of the first completion choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// OpenAI-compatible HTTP provider
pub struct HttpCompletionProvider {
    tag: String,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpCompletionProvider {
    pub fn new(config: &AiConfig, api_key: Option<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            tag: config.provider.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user},
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        if request.json_mode {
            body["response_format"] = serde_json::json!({"type": "json_object"});
        }
        body
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionProvider {
    fn tag(&self) -> &str {
        &self.tag
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| LlmError::MissingCredential(self.api_key_env.clone()))?;

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!("Calling {} with model {}", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout_secs)
                } else {
                    LlmError::Http(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Http(format!("HTTP {}: {}", status, body)));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Http(format!("Failed to parse response: {}", e)))?;

        completion_content(&response_json)
    }
}

/// Extract `choices[0].message.content` from a completion response
pub fn completion_content(response: &serde_json::Value) -> Result<String, LlmError> {
    response
        .get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("content"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or(LlmError::EmptyResponse)
}

/// Provider used when `ai.enabled = false`; every call fails
pub struct DisabledProvider;

#[async_trait]
impl CompletionProvider for DisabledProvider {
    fn tag(&self) -> &str {
        "disabled"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
        Err(LlmError::Disabled)
    }
}
