//! Coordinator dashboard aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::intake::SupportRecord;
use crate::triage::{Department, Urgency};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub support_requests: usize,
    pub volunteers: usize,
}

/// Per-urgency counts; all three keys are always present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrgencyCounts {
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

impl UrgencyCounts {
    pub fn add(&mut self, urgency: Urgency) {
        match urgency {
            Urgency::High => self.high += 1,
            Urgency::Medium => self.medium += 1,
            Urgency::Low => self.low += 1,
        }
    }

    pub fn get(&self, urgency: Urgency) -> usize {
        match urgency {
            Urgency::High => self.high,
            Urgency::Medium => self.medium,
            Urgency::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub totals: Totals,
    pub urgency_counts: UrgencyCounts,
    /// Only departments that occur in the records
    pub department_counts: BTreeMap<Department, usize>,
}

impl DashboardSummary {
    pub fn from_records(support: &[SupportRecord], volunteers: usize) -> Self {
        let mut summary = DashboardSummary {
            totals: Totals {
                support_requests: support.len(),
                volunteers,
            },
            ..Default::default()
        };
        for record in support {
            summary.urgency_counts.add(record.automation.urgency);
            *summary
                .department_counts
                .entry(record.automation.department)
                .or_insert(0) += 1;
        }
        summary
    }
}
