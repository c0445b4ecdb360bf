//! Triage labels and the records produced for each support request.

use serde::{Deserialize, Serialize};

/// Provider tag recorded when no AI output was used
pub const NO_PROVIDER: &str = "none";

/// How quickly staff should reach the requester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::High, Urgency::Medium, Urgency::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Exact label match; anything else is not an urgency
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == label)
    }

    /// Deterministic follow-up deadline for this urgency
    pub fn next_action(&self) -> &'static str {
        match self {
            Self::High => "Call within 2 hours",
            Self::Medium => "Contact same day",
            Self::Low => "Contact within 48 hours",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// NGO team a request is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Caregiver Mentorship")]
    CaregiverMentorship,
    #[serde(rename = "Financial Guidance")]
    FinancialGuidance,
    #[serde(rename = "Hospital Partner Connect")]
    HospitalPartnerConnect,
    #[serde(rename = "Awareness & Prevention")]
    AwarenessPrevention,
    #[serde(rename = "General Support")]
    GeneralSupport,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::CaregiverMentorship,
        Department::FinancialGuidance,
        Department::HospitalPartnerConnect,
        Department::AwarenessPrevention,
        Department::GeneralSupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaregiverMentorship => "Caregiver Mentorship",
            Self::FinancialGuidance => "Financial Guidance",
            Self::HospitalPartnerConnect => "Hospital Partner Connect",
            Self::AwarenessPrevention => "Awareness & Prevention",
            Self::GeneralSupport => "General Support",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == label)
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the rule-based classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub urgency: Urgency,
    pub department: Department,
    pub next_action: String,
    /// Multi-line case record for NGO staff
    pub summary_text: String,
}

/// Final triage fields persisted with a support request.
///
/// `next_action` and `summary_text` always come from the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRecord {
    pub urgency: Urgency,
    pub department: Department,
    pub next_action: String,
    pub summary_text: String,
    #[serde(default)]
    pub staff_summary: String,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
    #[serde(default)]
    pub auto_reply_draft: String,
    pub ai_provider: String,
    pub ai_enabled: bool,
}

impl AutomationRecord {
    /// Degraded record: the classifier output untouched, AI marked off
    pub fn from_fallback(fallback: &TriageResult) -> Self {
        Self {
            urgency: fallback.urgency,
            department: fallback.department,
            next_action: fallback.next_action.clone(),
            summary_text: fallback.summary_text.clone(),
            staff_summary: String::new(),
            follow_up_questions: Vec::new(),
            auto_reply_draft: String::new(),
            ai_provider: NO_PROVIDER.to_string(),
            ai_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for u in Urgency::ALL {
            assert_eq!(Urgency::from_label(u.as_str()), Some(u));
        }
        for d in Department::ALL {
            assert_eq!(Department::from_label(d.as_str()), Some(d));
        }
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(Urgency::from_label("high"), None);
        assert_eq!(Urgency::from_label("Critical"), None);
        assert_eq!(Department::from_label("general support"), None);
    }

    #[test]
    fn test_next_action_has_three_outputs() {
        let mut actions: Vec<&str> = Urgency::ALL.iter().map(|u| u.next_action()).collect();
        actions.sort();
        actions.dedup();
        assert_eq!(actions.len(), 3);
        assert_eq!(Urgency::High.next_action(), "Call within 2 hours");
        assert_eq!(Urgency::Medium.next_action(), "Contact same day");
        assert_eq!(Urgency::Low.next_action(), "Contact within 48 hours");
    }

    #[test]
    fn test_department_serializes_as_label() {
        let json = serde_json::to_string(&Department::AwarenessPrevention).unwrap();
        assert_eq!(json, "\"Awareness & Prevention\"");
        let back: Department = serde_json::from_str("\"Hospital Partner Connect\"").unwrap();
        assert_eq!(back, Department::HospitalPartnerConnect);
    }

    #[test]
    fn test_fallback_record() {
        let fallback = TriageResult {
            urgency: Urgency::Medium,
            department: Department::FinancialGuidance,
            next_action: Urgency::Medium.next_action().to_string(),
            summary_text: "summary".to_string(),
        };
        let record = AutomationRecord::from_fallback(&fallback);
        assert!(!record.ai_enabled);
        assert_eq!(record.ai_provider, NO_PROVIDER);
        assert_eq!(record.urgency, fallback.urgency);
        assert_eq!(record.summary_text, fallback.summary_text);
        assert!(record.follow_up_questions.is_empty());
    }

    #[test]
    fn test_automation_record_camel_case() {
        let fallback = TriageResult {
            urgency: Urgency::Low,
            department: Department::GeneralSupport,
            next_action: Urgency::Low.next_action().to_string(),
            summary_text: String::new(),
        };
        let value = serde_json::to_value(AutomationRecord::from_fallback(&fallback)).unwrap();
        assert_eq!(value["nextAction"], "Contact within 48 hours");
        assert_eq!(value["aiEnabled"], false);
        assert_eq!(value["aiProvider"], "none");
        assert!(value["followUpQuestions"].is_array());
    }
}
