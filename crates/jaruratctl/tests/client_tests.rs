//! ApiClient against a live in-process jaruratd with AI triage disabled.

use std::sync::Arc;

use jarurat_shared::{Department, SupportRequest, Urgency, Volunteer};
use jaruratctl::ApiClient;
use jaruratd::config::Config;
use jaruratd::routes;
use jaruratd::state::AppState;
use tempfile::TempDir;

async fn spawn_server(dir: &TempDir) -> String {
    let mut config = Config::default();
    config.server.data_dir = dir.path().to_path_buf();
    config.ai.enabled = false;
    let state = AppState::from_config(config).unwrap();
    let app = routes::router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn urgent_request() -> SupportRequest {
    let mut req = SupportRequest::new("Farhan Ali", "9000011111", "Bhopal", "Madhya Pradesh");
    req.symptoms = Some("heavy bleeding after surgery".to_string());
    req.needs = vec!["Doctor consultation".to_string()];
    req
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let client = ApiClient::new(&spawn_server(&dir).await).unwrap();
    let health = client.health().await.unwrap();
    assert!(health.ok);
    assert_eq!(health.service, "jarurat-care-api");
}

#[tokio::test]
async fn test_submit_list_and_show() {
    let dir = TempDir::new().unwrap();
    let client = ApiClient::new(&spawn_server(&dir).await).unwrap();

    let record = client.submit_support(&urgent_request()).await.unwrap();
    assert_eq!(record.automation.urgency, Urgency::High);
    assert_eq!(record.automation.department, Department::HospitalPartnerConnect);
    assert!(!record.automation.ai_enabled);

    let listed = client.list_support().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, record.id);

    let shown = client.get_support(record.id).await.unwrap();
    assert_eq!(shown, record);
}

#[tokio::test]
async fn test_server_detail_surfaced_on_error() {
    let dir = TempDir::new().unwrap();
    let client = ApiClient::new(&spawn_server(&dir).await).unwrap();

    let bad = SupportRequest::new("Farhan Ali", "12", "Bhopal", "Madhya Pradesh");
    let err = client.submit_support(&bad).await.unwrap_err().to_string();
    assert!(err.contains("422"), "{}", err);
    assert!(err.contains("phone: must be at least 6 characters"), "{}", err);

    let err = client
        .get_support(uuid::Uuid::new_v4())
        .await
        .unwrap_err()
        .to_string();
    assert!(err.contains("404"), "{}", err);
}

#[tokio::test]
async fn test_volunteers_and_dashboard() {
    let dir = TempDir::new().unwrap();
    let client = ApiClient::new(&spawn_server(&dir).await).unwrap();

    let mut volunteer = Volunteer::new("Lata Joshi", "9111122222", "Nagpur", "Maharashtra");
    volunteer.skills = vec!["Marathi".to_string()];
    let created = client.register_volunteer(&volunteer).await.unwrap();
    assert_eq!(created.volunteer.skills, vec!["Marathi".to_string()]);
    assert_eq!(client.list_volunteers().await.unwrap().len(), 1);

    client.submit_support(&urgent_request()).await.unwrap();
    let summary = client.dashboard().await.unwrap();
    assert_eq!(summary.totals.support_requests, 1);
    assert_eq!(summary.totals.volunteers, 1);
    assert_eq!(summary.urgency_counts.high, 1);
    assert_eq!(
        summary.department_counts.get(&Department::HospitalPartnerConnect),
        Some(&1)
    );
}

#[tokio::test]
async fn test_unreachable_server() {
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let err = client.health().await.unwrap_err().to_string();
    assert!(err.contains("Cannot reach Jarurat API"), "{}", err);
}
