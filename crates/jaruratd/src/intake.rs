//! Intake pipeline: validate, triage, persist.

use jarurat_shared::{
    AutomationRecord, CareError, DashboardSummary, SupportRecord, SupportRequest, Volunteer,
    VolunteerRecord,
};
use tracing::info;

use crate::state::AppState;

/// Rule-based triage first, then the AI reconciler on top of it
pub async fn triage(state: &AppState, req: &SupportRequest) -> AutomationRecord {
    let fallback = state.classifier.classify(req);
    state.reconciler.reconcile(req, &fallback).await
}

/// Validate, triage and store a support request.
/// Only validation and storage can fail; the AI path never does.
pub async fn submit_support(
    state: &AppState,
    req: SupportRequest,
) -> Result<SupportRecord, CareError> {
    req.validate()?;

    let automation = triage(state, &req).await;
    let record = SupportRecord::new(req, automation);
    state.support.prepend(record.clone()).await?;

    info!(
        "Support request {} stored: urgency={}, department={}, ai={}",
        record.id,
        record.automation.urgency,
        record.automation.department,
        record.automation.ai_provider
    );
    Ok(record)
}

pub async fn register_volunteer(
    state: &AppState,
    volunteer: Volunteer,
) -> Result<VolunteerRecord, CareError> {
    volunteer.validate()?;

    let record = VolunteerRecord::new(volunteer);
    state.volunteers.prepend(record.clone()).await?;

    info!("Volunteer {} registered", record.id);
    Ok(record)
}

pub async fn dashboard(state: &AppState) -> DashboardSummary {
    let support = state.support.list().await;
    let volunteers = state.volunteers.len().await;
    DashboardSummary::from_records(&support, volunteers)
}
