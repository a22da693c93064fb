use async_trait::async_trait;
use bazel_sbom::prelude::*;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock ScanRepository that replays a scripted sequence of statuses
///
/// Once the script is exhausted every poll reports `Pending`.
#[derive(Clone, Default)]
pub struct MockScanRepository {
    statuses: Arc<Mutex<VecDeque<ScanStatus>>>,
    pub submitted: Arc<Mutex<Vec<(String, Value)>>>,
    pub polls: Arc<Mutex<usize>>,
    pub fail_submit: bool,
}

impl MockScanRepository {
    pub fn new(statuses: Vec<ScanStatus>) -> Self {
        Self {
            statuses: Arc::new(Mutex::new(statuses.into())),
            ..Self::default()
        }
    }

    pub fn failing_submit() -> Self {
        Self {
            fail_submit: true,
            ..Self::default()
        }
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn poll_count(&self) -> usize {
        *self.polls.lock().unwrap()
    }
}

#[async_trait]
impl ScanRepository for MockScanRepository {
    async fn submit_sbom(&self, org_id: &str, sbom: &Value) -> Result<String> {
        if self.fail_submit {
            anyhow::bail!("Mock submit failure for org {}", org_id);
        }
        self.submitted
            .lock()
            .unwrap()
            .push((org_id.to_string(), sbom.clone()));
        Ok("mock-job".to_string())
    }

    async fn scan_status(&self, _org_id: &str, _job_id: &str) -> Result<ScanStatus> {
        *self.polls.lock().unwrap() += 1;
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ScanStatus::Pending))
    }

    async fn scan_results(&self, _org_id: &str, job_id: &str) -> Result<Value> {
        Ok(json!({ "job": job_id, "vulnerabilities": [] }))
    }
}
