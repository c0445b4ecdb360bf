//! AI triage reconciler.
//!
//! Asks the provider for a triage, clamps every field of its answer against
//! the fixed label sets and the rule-based result, and merges the two into
//! the automation record. Hard failures (no key, provider error, timeout,
//! unparseable output) degrade to the rule-based result wholesale.

use std::sync::Arc;
use std::time::Duration;

use jarurat_shared::{AutomationRecord, Department, SupportRequest, TriageResult, Urgency};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::AiConfig;
use crate::llm::{CompletionProvider, DisabledProvider, HttpCompletionProvider, LlmError};
use crate::prompts;

/// Hard cap on follow-up questions kept from the provider.
/// The prompt asks for 3 to 5; anything past 6 is dropped.
pub const MAX_FOLLOW_UPS: usize = 6;

/// Reasons the AI path is abandoned for a request
#[derive(Debug, Clone, thiserror::Error)]
pub enum TriageError {
    #[error("missing API credential (set {0})")]
    MissingCredential(String),

    #[error("provider call failed: {0}")]
    ProviderCall(String),

    #[error("provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("unparseable provider response: {0}")]
    UnparseableResponse(String),
}

impl From<LlmError> for TriageError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingCredential(env) => TriageError::MissingCredential(env),
            LlmError::Timeout(secs) => TriageError::Timeout(Duration::from_secs(secs)),
            other => TriageError::ProviderCall(other.to_string()),
        }
    }
}

/// Provider output after validation; labels are always in range
#[derive(Debug, Clone, PartialEq)]
pub struct AiTriage {
    pub urgency: Urgency,
    pub department: Department,
    pub staff_summary: String,
    pub follow_up_questions: Vec<String>,
    pub auto_reply_draft: String,
}

pub struct Reconciler {
    provider: Arc<dyn CompletionProvider>,
    config: AiConfig,
    timeout: Duration,
}

impl Reconciler {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: AiConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self {
            provider,
            config,
            timeout,
        }
    }

    /// Build the configured provider. A missing key is not an error here;
    /// each call fails with MissingCredential instead.
    pub fn from_config(config: &AiConfig) -> Self {
        if !config.enabled {
            info!("AI triage disabled, using rule-based triage only");
            return Self::new(Arc::new(DisabledProvider), config.clone());
        }

        let api_key = config.api_key();
        if api_key.is_none() {
            warn!(
                "{} is not set; AI triage will fall back to rules",
                config.api_key_env
            );
        }

        match HttpCompletionProvider::new(config, api_key) {
            Ok(provider) => {
                info!("AI triage via {} ({})", config.provider, provider.model());
                Self::new(Arc::new(provider), config.clone())
            }
            Err(e) => {
                warn!("AI provider unavailable: {}", e);
                Self::new(Arc::new(DisabledProvider), config.clone())
            }
        }
    }

    /// Override the whole-call budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_tag(&self) -> &str {
        self.provider.tag()
    }

    /// Never fails: any hard failure yields the fallback with AI marked off
    pub async fn reconcile(&self, req: &SupportRequest, fallback: &TriageResult) -> AutomationRecord {
        match self.request_ai_triage(req, fallback).await {
            Ok(ai) => {
                info!(
                    "AI triage: urgency={}, department={}, follow-ups={}",
                    ai.urgency,
                    ai.department,
                    ai.follow_up_questions.len()
                );
                merge(&ai, fallback, self.provider.tag())
            }
            Err(e) => {
                warn!("AI triage failed, using rule-based fallback: {}", e);
                AutomationRecord::from_fallback(fallback)
            }
        }
    }

    /// Call the provider and validate its answer
    pub async fn request_ai_triage(
        &self,
        req: &SupportRequest,
        fallback: &TriageResult,
    ) -> Result<AiTriage, TriageError> {
        let request = prompts::build_triage_request(req, &self.config);

        let content = tokio::time::timeout(self.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| TriageError::Timeout(self.timeout))??;

        let object = parse_ai_response(&content)?;
        Ok(validate_ai_triage(&object, fallback))
    }
}

/// Parse provider text as a JSON object, falling back to the outermost
/// brace-delimited substring when the text carries extra prose.
pub fn parse_ai_response(text: &str) -> Result<Map<String, Value>, TriageError> {
    let text = text.trim();

    let value = match serde_json::from_str::<Value>(text) {
        Ok(v) => v,
        Err(direct) => {
            let candidate = extract_json_object(text).ok_or_else(|| {
                TriageError::UnparseableResponse(format!("no JSON object found ({})", direct))
            })?;
            serde_json::from_str::<Value>(candidate)
                .map_err(|e| TriageError::UnparseableResponse(e.to_string()))?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(TriageError::UnparseableResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// First `{` through last `}`
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Clamp provider output. Out-of-range labels take the rule-based value;
/// follow-ups keep only non-blank strings, trimmed, at most MAX_FOLLOW_UPS.
pub fn validate_ai_triage(object: &Map<String, Value>, fallback: &TriageResult) -> AiTriage {
    let urgency = object
        .get("urgency")
        .and_then(Value::as_str)
        .and_then(Urgency::from_label)
        .unwrap_or(fallback.urgency);

    let department = object
        .get("department")
        .and_then(Value::as_str)
        .and_then(Department::from_label)
        .unwrap_or(fallback.department);

    let follow_up_questions = match object.get("followUpQuestions") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .take(MAX_FOLLOW_UPS)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    AiTriage {
        urgency,
        department,
        staff_summary: trimmed_text(object, "staffSummary"),
        follow_up_questions,
        auto_reply_draft: trimmed_text(object, "autoReplyDraft"),
    }
}

fn trimmed_text(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Labels and generated text from the AI; next action and summary always
/// from the rule-based result.
pub fn merge(ai: &AiTriage, fallback: &TriageResult, provider_tag: &str) -> AutomationRecord {
    AutomationRecord {
        urgency: ai.urgency,
        department: ai.department,
        next_action: fallback.next_action.clone(),
        summary_text: fallback.summary_text.clone(),
        staff_summary: ai.staff_summary.clone(),
        follow_up_questions: ai.follow_up_questions.clone(),
        auto_reply_draft: ai.auto_reply_draft.clone(),
        ai_provider: provider_tag.to_string(),
        ai_enabled: true,
    }
}
