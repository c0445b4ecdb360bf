//! Intake submissions: support requests and volunteer sign-ups.
//!
//! Field names on the wire are camelCase. Structural validation lives here so
//! the daemon and the CLI reject the same inputs.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CareError;
use crate::triage::AutomationRecord;

/// Minimum phone length accepted at intake
pub const MIN_PHONE_LEN: usize = 6;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Support request submitted by a patient or caregiver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    pub full_name: String,
    pub phone: String,
    pub city: String,
    pub state: String,

    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: Option<u32>,
    #[serde(default = "default_relation")]
    pub patient_relation: Option<String>,
    #[serde(default = "default_contact")]
    pub preferred_contact: Option<String>,

    #[serde(default)]
    pub cancer_type: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub needs: Vec<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_relation() -> Option<String> {
    Some("Self".to_string())
}

fn default_contact() -> Option<String> {
    Some("WhatsApp".to_string())
}

impl SupportRequest {
    /// Minimal request with only the required fields set
    pub fn new(full_name: &str, phone: &str, city: &str, state: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            age: None,
            patient_relation: default_relation(),
            preferred_contact: default_contact(),
            cancer_type: None,
            stage: None,
            needs: Vec::new(),
            symptoms: None,
            message: None,
        }
    }

    pub fn validate(&self) -> Result<(), CareError> {
        let errors = check_contact_fields(&self.full_name, &self.phone, &self.city, &self.state);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CareError::Validation(errors))
        }
    }
}

/// Volunteer sign-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub full_name: String,
    pub phone: String,
    pub city: String,
    pub state: String,

    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub availability_hours_per_week: Option<u32>,
    #[serde(default)]
    pub motivation: Option<String>,
}

impl Volunteer {
    pub fn new(full_name: &str, phone: &str, city: &str, state: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            email: None,
            skills: Vec::new(),
            availability_hours_per_week: None,
            motivation: None,
        }
    }

    pub fn validate(&self) -> Result<(), CareError> {
        let errors = check_contact_fields(&self.full_name, &self.phone, &self.city, &self.state);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CareError::Validation(errors))
        }
    }
}

fn check_contact_fields(full_name: &str, phone: &str, city: &str, state: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (field, value) in [("fullName", full_name), ("city", city), ("state", state)] {
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, "must not be empty"));
        }
    }
    if phone.trim().chars().count() < MIN_PHONE_LEN {
        errors.push(FieldError::new(
            "phone",
            &format!("must be at least {} characters", MIN_PHONE_LEN),
        ));
    }
    errors
}

/// Accepts a number, a numeric string, an empty string, or null.
fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<u32>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("age must be a whole number, got {:?}", s)))
        }
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("age must be a whole number, got {}", n))),
        Some(other) => Err(de::Error::custom(format!(
            "age must be a whole number, got {}",
            other
        ))),
    }
}

/// Treats an explicit null list the same as a missing one.
fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Persisted support request: submission plus triage output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub request: SupportRequest,
    #[serde(flatten)]
    pub automation: AutomationRecord,
}

impl SupportRecord {
    pub fn new(request: SupportRequest, automation: AutomationRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            request,
            automation,
        }
    }
}

/// Persisted volunteer sign-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub volunteer: Volunteer,
}

impl VolunteerRecord {
    pub fn new(volunteer: Volunteer) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            volunteer,
        }
    }
}
