use crate::ports::outbound::{ScanRepository, ScanStatus};
use crate::shared::error::SbomError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use std::time::Duration;

/// Default Snyk REST API host
pub const DEFAULT_REGION: &str = "us.api.snyk.io";

/// REST API version sent with every request
pub const DEFAULT_API_VERSION: &str = "2024-10-15";

const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";
const CYCLONEDX_JSON_FORMAT: &str = "CycloneDX JSON";

/// Connection settings for the Snyk REST API
#[derive(Debug, Clone)]
pub struct SnykConfig {
    pub region: String,
    pub token: String,
    pub api_version: String,
}

impl SnykConfig {
    pub fn new(region: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            token: token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Base URL for the configured region; a bare host gets `https://`
    fn base_url(&self) -> String {
        let region = self.region.trim_end_matches('/');
        if region.starts_with("https://") || region.starts_with("http://") {
            region.to_string()
        } else {
            format!("https://{}", region)
        }
    }
}

/// SnykClient adapter for the Snyk SBOM test API
///
/// This adapter implements the ScanRepository port. Every call is a single
/// request; the caller owns the polling loop.
pub struct SnykClient {
    client: reqwest::Client,
    config: SnykConfig,
}

impl SnykClient {
    pub fn new(config: SnykConfig) -> Result<Self> {
        let user_agent = format!("bazel-sbom/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    fn sbom_tests_url(&self, org_id: &str, suffix: &str) -> String {
        format!(
            "{}/rest/orgs/{}/sbom_tests{}?version={}",
            self.config.base_url(),
            urlencoding::encode(org_id),
            suffix,
            urlencoding::encode(&self.config.api_version)
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.config.token))
            .header(ACCEPT, JSON_API_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| api_error(format!("request to {} failed: {}", url, e)))?;

        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(format!(
                "Snyk API returned status code {}: {}",
                status,
                body.trim()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| api_error(format!("invalid JSON response: {}", e)))
    }
}

#[async_trait]
impl ScanRepository for SnykClient {
    async fn submit_sbom(&self, org_id: &str, sbom: &Value) -> Result<String> {
        let url = self.sbom_tests_url(org_id, "");
        let body = json!({
            "data": {
                "type": "sbom_tests",
                "attributes": { "sbom": sbom }
            }
        });

        tracing::debug!(%url, "submitting SBOM test");
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", self.config.token))
            .header(CONTENT_TYPE, JSON_API_CONTENT_TYPE)
            .header(ACCEPT, JSON_API_CONTENT_TYPE)
            .body(serde_json::to_vec(&body)?)
            .send()
            .await
            .map_err(|e| api_error(format!("request to {} failed: {}", url, e)))?;

        let payload = Self::read_json(response).await?;
        extract_job_id(&payload)
    }

    async fn scan_status(&self, org_id: &str, job_id: &str) -> Result<ScanStatus> {
        let url = self.sbom_tests_url(org_id, &format!("/{}", urlencoding::encode(job_id)));
        let payload = self.get_json(&url).await?;
        let status = interpret_status(&payload);
        tracing::debug!(job_id, ?status, "polled SBOM test status");
        Ok(status)
    }

    async fn scan_results(&self, org_id: &str, job_id: &str) -> Result<Value> {
        let url = self.sbom_tests_url(
            org_id,
            &format!("/{}/results", urlencoding::encode(job_id)),
        );
        self.get_json(&url).await
    }
}

/// Reads the job id from a submission response (`data.id`)
fn extract_job_id(payload: &Value) -> Result<String> {
    payload
        .pointer("/data/id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .ok_or_else(|| api_error("submission response does not contain data.id"))
}

/// Maps a status response onto a `ScanStatus`
///
/// `data.attributes.status == "completed"` wins; otherwise an accepted
/// CycloneDX SBOM (`data.attributes.sbom.format`) means results can be fetched.
fn interpret_status(payload: &Value) -> ScanStatus {
    let attributes = payload.pointer("/data/attributes");
    let status = attributes
        .and_then(|a| a.get("status"))
        .and_then(Value::as_str);
    if status == Some("completed") {
        return ScanStatus::Completed;
    }

    let format = attributes
        .and_then(|a| a.pointer("/sbom/format"))
        .and_then(Value::as_str);
    if format == Some(CYCLONEDX_JSON_FORMAT) {
        return ScanStatus::ResultsPresent;
    }

    ScanStatus::Pending
}

fn api_error(details: impl Into<String>) -> anyhow::Error {
    SbomError::ScanApi {
        details: details.into(),
    }
    .into()
}
