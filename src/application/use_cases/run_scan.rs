use crate::application::dto::{ScanRequest, ScanResponse, ScanType};
use crate::ports::outbound::{ProgressReporter, ScanRepository, ScanStatus};
use crate::shared::error::SbomError;
use crate::shared::Result;
use serde_json::Value;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Polling behaviour of a scan run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl ScanSettings {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);

    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    /// Upper bound on status requests, used to size the progress bar
    fn max_polls(&self) -> usize {
        let interval = self.poll_interval.as_millis().max(1);
        (self.timeout.as_millis().div_ceil(interval) + 1) as usize
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POLL_INTERVAL, Self::DEFAULT_TIMEOUT)
    }
}

/// RunScanUseCase - Submits an SBOM to the scanning service and waits for results
///
/// Submits once, then polls the job status at a fixed interval until the
/// service reports a terminal state or the timeout elapses.
///
/// # Type Parameters
/// * `SR` - ScanRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct RunScanUseCase<SR, PR> {
    scan_repository: SR,
    progress_reporter: PR,
    settings: ScanSettings,
}

impl<SR, PR> RunScanUseCase<SR, PR>
where
    SR: ScanRepository,
    PR: ProgressReporter,
{
    pub fn new(scan_repository: SR, progress_reporter: PR, settings: ScanSettings) -> Self {
        Self {
            scan_repository,
            progress_reporter,
            settings,
        }
    }

    /// Runs the scan and returns the service's results document
    ///
    /// # Errors
    /// - `UnsupportedScanType` for `monitor`, before any request is sent
    /// - `ScanApi` when a request fails
    /// - `ScanTimeout` when the job is still pending after the timeout
    pub async fn execute(&self, request: ScanRequest, sbom: &Value) -> Result<ScanResponse> {
        if request.scan_type != ScanType::Test {
            return Err(SbomError::UnsupportedScanType {
                scan_type: request.scan_type.to_string(),
            }
            .into());
        }

        self.progress_reporter
            .report(&format!("🔎 Submitting SBOM for a Snyk {} scan", request.scan_type));
        let job_id = self
            .scan_repository
            .submit_sbom(&request.org_id, sbom)
            .await?;
        self.progress_reporter
            .report(&format!("⏳ Scan job {} started, waiting for results", job_id));

        let status = self.wait_for_completion(&request.org_id, &job_id).await?;
        let results = self
            .scan_repository
            .scan_results(&request.org_id, &job_id)
            .await?;

        self.progress_reporter
            .report_completion(&format!("✅ Snyk scan {} completed", job_id));

        Ok(ScanResponse {
            job_id,
            status,
            results,
        })
    }

    async fn wait_for_completion(&self, org_id: &str, job_id: &str) -> Result<ScanStatus> {
        let started = Instant::now();
        let max_polls = self.settings.max_polls();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            let status = self.scan_repository.scan_status(org_id, job_id).await?;
            let message = format!("Waiting for scan {} ({:?})", job_id, status);
            self.progress_reporter
                .report_progress(attempt.min(max_polls), max_polls, Some(message.as_str()));
            if status.is_terminal() {
                tracing::debug!(job_id, attempt, ?status, "scan finished");
                return Ok(status);
            }

            let elapsed = started.elapsed();
            if elapsed >= self.settings.timeout {
                return Err(SbomError::ScanTimeout {
                    job_id: job_id.to_string(),
                    elapsed_secs: elapsed.as_secs(),
                }
                .into());
            }
            let remaining = self.settings.timeout - elapsed;
            sleep(self.settings.poll_interval.min(remaining)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct MockScanRepository {
        statuses: Mutex<VecDeque<ScanStatus>>,
        submits: Arc<AtomicUsize>,
        polls: Arc<AtomicUsize>,
    }

    impl MockScanRepository {
        fn new(statuses: Vec<ScanStatus>) -> Self {
            Self {
                statuses: Mutex::new(statuses.into()),
                submits: Arc::new(AtomicUsize::new(0)),
                polls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ScanRepository for MockScanRepository {
        async fn submit_sbom(&self, _org_id: &str, _sbom: &Value) -> Result<String> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            Ok("job-1".to_string())
        }

        async fn scan_status(&self, _org_id: &str, _job_id: &str) -> Result<ScanStatus> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            let mut statuses = self.statuses.lock().unwrap();
            Ok(statuses.pop_front().unwrap_or(ScanStatus::Pending))
        }

        async fn scan_results(&self, org_id: &str, job_id: &str) -> Result<Value> {
            Ok(json!({"org": org_id, "job": job_id, "issues": []}))
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_warning(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn fast_settings() -> ScanSettings {
        ScanSettings::new(Duration::from_millis(1), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_execute_polls_until_completed() {
        let repository = MockScanRepository::new(vec![
            ScanStatus::Pending,
            ScanStatus::Pending,
            ScanStatus::Completed,
        ]);
        let (submits, polls) = (repository.submits.clone(), repository.polls.clone());
        let use_case = RunScanUseCase::new(repository, SilentReporter, fast_settings());

        let response = use_case
            .execute(ScanRequest::new(ScanType::Test, "org-1"), &json!({}))
            .await
            .unwrap();

        assert_eq!(response.job_id, "job-1");
        assert_eq!(response.status, ScanStatus::Completed);
        assert_eq!(response.results["org"], "org-1");
        assert_eq!(submits.load(Ordering::SeqCst), 1);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_execute_accepts_results_present() {
        let repository = MockScanRepository::new(vec![ScanStatus::ResultsPresent]);
        let polls = repository.polls.clone();
        let use_case = RunScanUseCase::new(repository, SilentReporter, fast_settings());

        let response = use_case
            .execute(ScanRequest::new(ScanType::Test, "org-1"), &json!({}))
            .await
            .unwrap();

        assert_eq!(response.status, ScanStatus::ResultsPresent);
        assert_eq!(polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execute_times_out() {
        let repository = MockScanRepository::new(vec![]);
        let settings = ScanSettings::new(Duration::from_millis(5), Duration::from_millis(30));
        let polls = repository.polls.clone();
        let use_case = RunScanUseCase::new(repository, SilentReporter, settings);

        let result = use_case
            .execute(ScanRequest::new(ScanType::Test, "org-1"), &json!({}))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::ScanTimeout { .. })
        ));
        assert!(polls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_execute_rejects_monitor_before_submitting() {
        let repository = MockScanRepository::new(vec![ScanStatus::Completed]);
        let submits = repository.submits.clone();
        let use_case = RunScanUseCase::new(repository, SilentReporter, fast_settings());

        let result = use_case
            .execute(ScanRequest::new(ScanType::Monitor, "org-1"), &json!({}))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::UnsupportedScanType { .. })
        ));
        assert_eq!(submits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_scan_settings_defaults() {
        let settings = ScanSettings::default();
        assert_eq!(settings.poll_interval, Duration::from_secs(30));
        assert_eq!(settings.timeout, Duration::from_secs(1800));
        assert_eq!(settings.max_polls(), 61);
    }
}
