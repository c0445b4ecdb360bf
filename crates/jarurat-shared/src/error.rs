//! Error types for Jarurat Care.

use thiserror::Error;

use crate::intake::FieldError;

#[derive(Error, Debug)]
pub enum CareError {
    #[error("Validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = CareError::Validation(vec![
            FieldError::new("fullName", "must not be empty"),
            FieldError::new("phone", "must be at least 6 characters"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("fullName: must not be empty"));
        assert!(msg.contains("phone: must be at least 6 characters"));
    }
}
