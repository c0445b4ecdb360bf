//! HTTP client for the jaruratd API.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use jarurat_shared::{
    DashboardSummary, ErrorBody, HealthResponse, ItemResponse, ItemsResponse, SupportRecord,
    SupportRequest, Volunteer, VolunteerRecord,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Default API address when neither `--server` nor `JARURAT_API` is set
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

/// Submissions wait on the AI call server-side, so leave room above its timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for communicating with jaruratd
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jaruratctl/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("Cannot reach Jarurat API at {}", self.base_url))?;
        decode(resp).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Cannot reach Jarurat API at {}", self.base_url))?;
        decode(resp).await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    pub async fn list_support(&self) -> Result<Vec<SupportRecord>> {
        let resp: ItemsResponse<SupportRecord> = self.get("/api/support").await?;
        Ok(resp.items)
    }

    pub async fn get_support(&self, id: Uuid) -> Result<SupportRecord> {
        let resp: ItemResponse<SupportRecord> = self.get(&format!("/api/support/{}", id)).await?;
        Ok(resp.item)
    }

    pub async fn submit_support(&self, request: &SupportRequest) -> Result<SupportRecord> {
        let resp: ItemResponse<SupportRecord> = self.post("/api/support", request).await?;
        Ok(resp.item)
    }

    pub async fn list_volunteers(&self) -> Result<Vec<VolunteerRecord>> {
        let resp: ItemsResponse<VolunteerRecord> = self.get("/api/volunteers").await?;
        Ok(resp.items)
    }

    pub async fn register_volunteer(&self, volunteer: &Volunteer) -> Result<VolunteerRecord> {
        let resp: ItemResponse<VolunteerRecord> = self.post("/api/volunteers", volunteer).await?;
        Ok(resp.item)
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        self.get("/api/dashboard/summary").await
    }
}

/// Parse a success body, or turn the server's `detail` into an error
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.describe())
            .unwrap_or(text);
        bail!("Request failed ({}): {}", status, message);
    }

    resp.json()
        .await
        .map_err(|e| anyhow!("Unexpected response from server: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }
}
