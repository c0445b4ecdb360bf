//! API routes for jaruratd

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use jarurat_shared::{
    DashboardSummary, HealthResponse, ItemResponse, ItemsResponse, MessageResponse,
    SupportRecord, SupportRequest, Volunteer, VolunteerRecord, SERVICE_NAME, VERSION,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::intake;
use crate::state::SharedState;

pub fn router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/support", get(list_support).post(create_support))
        .route("/api/support/:id", get(get_support))
        .route("/api/volunteers", get(list_volunteers).post(create_volunteer))
        .route("/api/dashboard/summary", get(dashboard_summary))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Listed origins, credentials allowed, methods and headers mirrored
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", o, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

// ============================================================================
// Service Routes
// ============================================================================

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Jarurat Care support API running".to_string(),
    })
}

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
        version: VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

// ============================================================================
// Support Routes
// ============================================================================

async fn list_support(State(state): State<SharedState>) -> Json<ItemsResponse<SupportRecord>> {
    Json(ItemsResponse {
        items: state.support.list().await,
    })
}

async fn get_support(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse<SupportRecord>>, ApiError> {
    state
        .support
        .list()
        .await
        .into_iter()
        .find(|r| r.id == id)
        .map(|item| Json(ItemResponse { item }))
        .ok_or_else(|| ApiError::NotFound(format!("Support request {} not found", id)))
}

async fn create_support(
    State(state): State<SharedState>,
    payload: Result<Json<SupportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse<SupportRecord>>), ApiError> {
    let Json(req) = payload?;
    let item = intake::submit_support(&state, req).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}

// ============================================================================
// Volunteer Routes
// ============================================================================

async fn list_volunteers(
    State(state): State<SharedState>,
) -> Json<ItemsResponse<VolunteerRecord>> {
    Json(ItemsResponse {
        items: state.volunteers.list().await,
    })
}

async fn create_volunteer(
    State(state): State<SharedState>,
    payload: Result<Json<Volunteer>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse<VolunteerRecord>>), ApiError> {
    let Json(volunteer) = payload?;
    let item = intake::register_volunteer(&state, volunteer).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}

// ============================================================================
// Dashboard Routes
// ============================================================================

async fn dashboard_summary(State(state): State<SharedState>) -> Json<DashboardSummary> {
    Json(intake::dashboard(&state).await)
}
