//! Terminal rendering for API records.
//!
//! Everything returns a `String` so commands stay thin and output is
//! testable without a terminal.

use jarurat_shared::{DashboardSummary, HealthResponse, SupportRecord, Urgency, VolunteerRecord};
use owo_colors::OwoColorize;

const SEPARATOR: &str = "------------------------------------------------------------";

/// Urgency label padded to a fixed width and colored by severity
pub fn urgency_label(urgency: Urgency) -> String {
    let label = format!("{:<6}", urgency.as_str());
    match urgency {
        Urgency::High => label.bright_red().bold().to_string(),
        Urgency::Medium => label.yellow().to_string(),
        Urgency::Low => label.green().to_string(),
    }
}

/// Parse an urgency filter, ignoring case
pub fn parse_urgency(value: &str) -> Result<Urgency, String> {
    Urgency::ALL
        .iter()
        .copied()
        .find(|u| u.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| format!("expected one of High, Medium, Low; got {:?}", value))
}

pub fn support_row(record: &SupportRecord) -> String {
    format!(
        "{}  {}  {}  {:<24}  {}, {}  [{}]",
        record.id.to_string().dimmed(),
        record.created_at.format("%Y-%m-%d %H:%M"),
        urgency_label(record.automation.urgency),
        record.automation.department.as_str(),
        record.request.full_name,
        record.request.city,
        record.automation.next_action
    )
}

pub fn support_table(records: &[SupportRecord]) -> String {
    if records.is_empty() {
        return "No support requests.".dimmed().to_string();
    }
    let mut lines: Vec<String> = records.iter().map(support_row).collect();
    lines.push(format!("{} request(s)", records.len()));
    lines.join("\n")
}

/// Full record: case summary plus the automation fields
pub fn support_detail(record: &SupportRecord) -> String {
    let automation = &record.automation;
    let mut out = vec![
        format!("{} {}", "Request".bold(), record.id),
        format!("Received:   {}", record.created_at.to_rfc3339()),
        format!("Urgency:    {}", urgency_label(automation.urgency)),
        format!("Department: {}", automation.department),
        format!("Action:     {}", automation.next_action.cyan()),
        format!(
            "AI triage:  {}",
            if automation.ai_enabled {
                format!("yes ({})", automation.ai_provider).green().to_string()
            } else {
                "no (rule-based)".dimmed().to_string()
            }
        ),
        SEPARATOR.to_string(),
        automation.summary_text.clone(),
    ];

    if !automation.staff_summary.is_empty() {
        out.push(SEPARATOR.to_string());
        out.push(format!("{}", "[STAFF SUMMARY]".bold()));
        out.push(automation.staff_summary.clone());
    }
    if !automation.follow_up_questions.is_empty() {
        out.push(String::new());
        out.push(format!("{}", "[FOLLOW-UP QUESTIONS]".bold()));
        for (i, question) in automation.follow_up_questions.iter().enumerate() {
            out.push(format!("  {}. {}", i + 1, question));
        }
    }
    if !automation.auto_reply_draft.is_empty() {
        out.push(String::new());
        out.push(format!("{}", "[REPLY DRAFT]".bold()));
        out.push(automation.auto_reply_draft.clone());
    }
    out.join("\n")
}

pub fn volunteer_table(records: &[VolunteerRecord]) -> String {
    if records.is_empty() {
        return "No volunteers registered.".dimmed().to_string();
    }
    let mut lines: Vec<String> = records
        .iter()
        .map(|r| {
            let v = &r.volunteer;
            let hours = v
                .availability_hours_per_week
                .map(|h| format!("{}h/week", h))
                .unwrap_or_else(|| "-".to_string());
            let skills = if v.skills.is_empty() {
                "-".to_string()
            } else {
                v.skills.join(", ")
            };
            format!(
                "{}  {:<24}  {}, {}  {:<9}  {}",
                r.id.to_string().dimmed(),
                v.full_name,
                v.city,
                v.state,
                hours,
                skills
            )
        })
        .collect();
    lines.push(format!("{} volunteer(s)", records.len()));
    lines.join("\n")
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    let mut out = vec![
        format!("{}", "[TOTALS]".bold()),
        format!("  Support requests  {}", summary.totals.support_requests),
        format!("  Volunteers        {}", summary.totals.volunteers),
        String::new(),
        format!("{}", "[URGENCY]".bold()),
    ];
    for urgency in Urgency::ALL {
        out.push(format!(
            "  {}  {}",
            urgency_label(urgency),
            summary.urgency_counts.get(urgency)
        ));
    }
    out.push(String::new());
    out.push(format!("{}", "[DEPARTMENTS]".bold()));
    if summary.department_counts.is_empty() {
        out.push("  none yet".dimmed().to_string());
    }
    for (department, count) in &summary.department_counts {
        out.push(format!("  {:<26}{}", department.as_str(), count));
    }
    out.join("\n")
}

pub fn health(health: &HealthResponse) -> String {
    let state = if health.ok {
        "OK".green().to_string()
    } else {
        "DEGRADED".bright_red().to_string()
    };
    format!(
        "{} {} v{}  up {}s",
        state, health.service, health.version, health.uptime_seconds
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarurat_shared::{AutomationRecord, Department, SupportRequest, TriageResult};

    fn record(urgency: Urgency) -> SupportRecord {
        let triage = TriageResult {
            urgency,
            department: Department::FinancialGuidance,
            next_action: urgency.next_action().to_string(),
            summary_text: "Jarurat Care Case Summary".to_string(),
        };
        SupportRecord::new(
            SupportRequest::new("Kavya Nair", "9876501234", "Kochi", "Kerala"),
            AutomationRecord::from_fallback(&triage),
        )
    }

    #[test]
    fn test_parse_urgency_case_insensitive() {
        assert_eq!(parse_urgency("high"), Ok(Urgency::High));
        assert_eq!(parse_urgency(" MEDIUM "), Ok(Urgency::Medium));
        assert!(parse_urgency("urgent").is_err());
    }

    #[test]
    fn test_support_row_has_key_fields() {
        let row = support_row(&record(Urgency::Medium));
        assert!(row.contains("Kavya Nair"));
        assert!(row.contains("Kochi"));
        assert!(row.contains("Financial Guidance"));
        assert!(row.contains("Contact same day"));
    }

    #[test]
    fn test_detail_skips_empty_ai_sections() {
        let detail = support_detail(&record(Urgency::Low));
        assert!(detail.contains("rule-based"));
        assert!(!detail.contains("[STAFF SUMMARY]"));

        let mut with_ai = record(Urgency::High);
        with_ai.automation.ai_enabled = true;
        with_ai.automation.ai_provider = "groq".to_string();
        with_ai.automation.follow_up_questions = vec!["Which hospital?".to_string()];
        let detail = support_detail(&with_ai);
        assert!(detail.contains("groq"));
        assert!(detail.contains("1. Which hospital?"));
    }

    #[test]
    fn test_empty_tables() {
        assert!(support_table(&[]).contains("No support requests"));
        assert!(volunteer_table(&[]).contains("No volunteers"));
    }

    #[test]
    fn test_dashboard_lists_all_urgencies() {
        let records = vec![record(Urgency::High), record(Urgency::High)];
        let summary = DashboardSummary::from_records(&records, 3);
        let text = dashboard(&summary);
        for label in ["High", "Medium", "Low", "Financial Guidance"] {
            assert!(text.contains(label), "missing {}", label);
        }
        assert!(text.contains("Volunteers        3"));
    }
}
