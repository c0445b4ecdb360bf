//! Request/response envelopes shared by the HTTP API and its clients.

use serde::{Deserialize, Serialize};

/// `{"items": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

/// `{"item": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    pub item: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Error body; `detail` is a string or a list of field errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable form of `detail`
    pub fn describe(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| match (item.get("field"), item.get("message")) {
                    (Some(f), Some(m)) => format!(
                        "{}: {}",
                        f.as_str().unwrap_or_default(),
                        m.as_str().unwrap_or_default()
                    ),
                    _ => item.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
