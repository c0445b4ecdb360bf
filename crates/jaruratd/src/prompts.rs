//! Triage prompt building for the AI provider.

use jarurat_shared::{Department, SupportRequest, Urgency};

use crate::config::AiConfig;
use crate::llm::CompletionRequest;

/// System message: JSON only
pub const SYSTEM_PROMPT: &str = "Return JSON only. Do not include any extra text.";

/// Keys the provider must return, in order
pub const RESPONSE_KEYS: [&str; 5] = [
    "urgency",
    "department",
    "staffSummary",
    "followUpQuestions",
    "autoReplyDraft",
];

const ROLE: &str = r#"You are an NGO triage assistant for Jarurat Care (cancer care community in India).
You help coordinators by generating operational text and triage labels."#;

fn quoted(labels: impl Iterator<Item = &'static str>) -> String {
    labels
        .map(|l| format!("\"{}\"", l))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shape shown to the provider
pub fn response_schema() -> serde_json::Value {
    let urgencies: Vec<&str> = Urgency::ALL.iter().map(|u| u.as_str()).collect();
    let departments: Vec<&str> = Department::ALL.iter().map(|d| d.as_str()).collect();
    serde_json::json!({
        "urgency": urgencies.join("|"),
        "department": departments.join("|"),
        "staffSummary": "1-2 lines summary for NGO staff (no medical advice)",
        "followUpQuestions": ["3-5 short questions to ask requester"],
        "autoReplyDraft": "short WhatsApp-ready message from Jarurat Care team"
    })
}

/// User message: role, strict rules, schema, and the full submission
pub fn build_triage_prompt(req: &SupportRequest) -> String {
    let submission = serde_json::to_string(req).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"{role}

STRICT RULES:
- Do NOT provide medical advice, diagnosis, or treatment suggestions.
- Only summarize and organize what the requester said.
- Output MUST be valid JSON ONLY. No markdown, no extra text.
- Use EXACTLY these keys: {keys}
- urgency must be exactly one of: {urgencies}
- department must be exactly one of:
  {departments}
- followUpQuestions must be a JSON array of 3 to 5 strings.

Return JSON in this shape:
{schema}

User submission JSON:
{submission}"#,
        role = ROLE,
        keys = RESPONSE_KEYS.join(", "),
        urgencies = quoted(Urgency::ALL.iter().map(|u| u.as_str())),
        departments = quoted(Department::ALL.iter().map(|d| d.as_str())),
        schema = response_schema(),
        submission = submission,
    )
}

/// Completion request for one submission
pub fn build_triage_request(req: &SupportRequest, config: &AiConfig) -> CompletionRequest {
    CompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: build_triage_prompt(req),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        json_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_submission() {
        let mut req = SupportRequest::new("Asha", "9876543210", "Pune", "MH");
        req.symptoms = Some("persistent cough".to_string());
        let prompt = build_triage_prompt(&req);

        assert!(prompt.contains("\"fullName\":\"Asha\""));
        assert!(prompt.contains("persistent cough"));
        assert!(prompt.contains("Do NOT provide medical advice"));
        assert!(prompt.contains("urgency, department, staffSummary, followUpQuestions, autoReplyDraft"));
        assert!(prompt.contains("\"Awareness & Prevention\""));
    }

    #[test]
    fn test_schema_lists_all_labels() {
        let schema = response_schema();
        assert_eq!(schema["urgency"], "High|Medium|Low");
        assert!(schema["department"].as_str().unwrap().contains("Hospital Partner Connect"));
        for key in RESPONSE_KEYS {
            assert!(schema.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_request_settings_follow_config() {
        let req = SupportRequest::new("Asha", "9876543210", "Pune", "MH");
        let config = AiConfig {
            max_tokens: 256,
            ..AiConfig::default()
        };
        let completion = build_triage_request(&req, &config);
        assert_eq!(completion.system, SYSTEM_PROMPT);
        assert_eq!(completion.max_tokens, 256);
        assert!(completion.json_mode);
    }
}
