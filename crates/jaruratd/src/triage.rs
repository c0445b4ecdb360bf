//! Rule-based triage classifier.
//!
//! Deterministic fallback for every support request: urgency from keyword
//! sets, department from an ordered rule list, next action from urgency, and
//! a fixed-format case summary for staff. Never fails.

use jarurat_shared::{Department, SupportRequest, TriageResult, Urgency};

use crate::config::TriageConfig;

/// Keyword sets for urgency detection, lowercased
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSets {
    pub high: Vec<String>,
    pub medium: Vec<String>,
}

impl KeywordSets {
    pub fn new<I, S>(high: I, medium: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            high: normalize(high),
            medium: normalize(medium),
        }
    }
}

impl From<&TriageConfig> for KeywordSets {
    fn from(config: &TriageConfig) -> Self {
        Self::new(&config.high_keywords, &config.medium_keywords)
    }
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self::from(&TriageConfig::default())
    }
}

fn normalize<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// One step of the department cascade. Matches when the search text contains
/// any `text_terms` entry or any need contains any `need_terms` entry.
#[derive(Debug, Clone, Copy)]
pub struct DepartmentRule {
    pub department: Department,
    pub text_terms: &'static [&'static str],
    pub need_terms: &'static [&'static str],
}

impl DepartmentRule {
    pub fn matches(&self, text: &str, needs: &[String]) -> bool {
        self.text_terms.iter().any(|t| text.contains(t))
            || needs.iter().any(|n| {
                let n = n.to_lowercase();
                self.need_terms.iter().any(|t| n.contains(t))
            })
    }
}

/// Evaluated in order; first match wins, otherwise General Support.
pub const DEPARTMENT_RULES: &[DepartmentRule] = &[
    DepartmentRule {
        department: Department::CaregiverMentorship,
        text_terms: &["caregiver", "mentorship", "emotional"],
        need_terms: &[],
    },
    DepartmentRule {
        department: Department::FinancialGuidance,
        text_terms: &["fund"],
        need_terms: &["medicine", "financial"],
    },
    DepartmentRule {
        department: Department::HospitalPartnerConnect,
        text_terms: &["appointment"],
        need_terms: &["hospital", "doctor"],
    },
    DepartmentRule {
        department: Department::AwarenessPrevention,
        text_terms: &["awareness", "screening", "prevention"],
        need_terms: &[],
    },
];

/// Department used when no rule matches
pub const DEFAULT_DEPARTMENT: Department = Department::GeneralSupport;

/// Placeholder for missing summary fields
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    keywords: KeywordSets,
}

impl Classifier {
    pub fn new(keywords: KeywordSets) -> Self {
        Self { keywords }
    }

    pub fn classify(&self, req: &SupportRequest) -> TriageResult {
        let text = search_text(req);
        let urgency = self.urgency_for_text(&text);
        let department = department_for_text(&text, &req.needs);
        let next_action = urgency.next_action().to_string();
        let summary_text = render_summary(req, urgency, department, &next_action);

        TriageResult {
            urgency,
            department,
            next_action,
            summary_text,
        }
    }

    /// High keywords take precedence over medium ones
    pub fn detect_urgency(&self, req: &SupportRequest) -> Urgency {
        self.urgency_for_text(&search_text(req))
    }

    /// Urgency for an already-built search text
    pub fn urgency_for_text(&self, text: &str) -> Urgency {
        if self.keywords.high.iter().any(|k| text.contains(k.as_str())) {
            Urgency::High
        } else if self.keywords.medium.iter().any(|k| text.contains(k.as_str())) {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }
}

/// Lowercased cancer type, stage, symptoms, message and needs, space-joined
pub fn search_text(req: &SupportRequest) -> String {
    let needs = req.needs.join(" ");
    [
        req.cancer_type.as_deref().unwrap_or(""),
        req.stage.as_deref().unwrap_or(""),
        req.symptoms.as_deref().unwrap_or(""),
        req.message.as_deref().unwrap_or(""),
        needs.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

pub fn recommend_department(req: &SupportRequest) -> Department {
    department_for_text(&search_text(req), &req.needs)
}

/// Department for an already-built search text
pub fn department_for_text(text: &str, needs: &[String]) -> Department {
    DEPARTMENT_RULES
        .iter()
        .find(|rule| rule.matches(text, needs))
        .map(|rule| rule.department)
        .unwrap_or(DEFAULT_DEPARTMENT)
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

fn trimmed_or_na(value: Option<&str>) -> &str {
    or_na(value.map(str::trim))
}

/// Fixed-format case record stored verbatim as `summaryText`
pub fn render_summary(
    req: &SupportRequest,
    urgency: Urgency,
    department: Department,
    next_action: &str,
) -> String {
    let age = req
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let needs = if req.needs.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        req.needs.join(", ")
    };

    let lines = [
        "Jarurat Care Case Summary".to_string(),
        format!(
            "Requester: {} | Relation: {} | Age: {}",
            or_na(Some(req.full_name.as_str())),
            or_na(req.patient_relation.as_deref()),
            age
        ),
        format!("Location: {}, {}", or_na(Some(req.city.as_str())), or_na(Some(req.state.as_str()))),
        format!(
            "Contact: {} | Preferred: {}",
            or_na(Some(req.phone.as_str())),
            or_na(req.preferred_contact.as_deref())
        ),
        format!(
            "Cancer: {} | Stage: {}",
            or_na(req.cancer_type.as_deref()),
            or_na(req.stage.as_deref())
        ),
        format!("Needs: {}", needs),
        format!("Symptoms: {}", trimmed_or_na(req.symptoms.as_deref())),
        format!("Notes: {}", trimmed_or_na(req.message.as_deref())),
        format!("Urgency (auto): {}", urgency),
        format!("Suggested Department (auto): {}", department),
        format!("Next Action (auto): {}", next_action),
    ];
    lines.join("\n")
}
