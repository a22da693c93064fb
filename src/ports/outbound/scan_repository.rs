use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// State of a submitted SBOM scan job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Still queued or running
    Pending,
    /// The status endpoint did not report completion but the SBOM was accepted
    /// and results can be fetched
    ResultsPresent,
    Completed,
}

impl ScanStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ScanStatus::Pending)
    }
}

/// ScanRepository port for a remote SBOM vulnerability-scanning service
///
/// # Async Support
/// All methods are async. Implementations must be `Send + Sync`.
#[async_trait]
pub trait ScanRepository: Send + Sync {
    /// Submits an SBOM for testing
    ///
    /// # Returns
    /// The job id assigned by the service
    ///
    /// # Errors
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the response carries no job id
    async fn submit_sbom(&self, org_id: &str, sbom: &Value) -> Result<String>;

    /// Fetches the current status of a scan job
    async fn scan_status(&self, org_id: &str, job_id: &str) -> Result<ScanStatus>;

    /// Fetches the results of a finished scan job
    async fn scan_results(&self, org_id: &str, job_id: &str) -> Result<Value>;
}
