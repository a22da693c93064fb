use crate::ports::outbound::ScanStatus;
use crate::shared::error::SbomError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Kind of remote scan requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    /// One-off vulnerability test of the SBOM
    Test,
    /// Continuous monitoring (accepted by the parser, not supported)
    Monitor,
}

impl FromStr for ScanType {
    type Err = SbomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" => Ok(ScanType::Test),
            "monitor" => Ok(ScanType::Monitor),
            _ => Err(SbomError::Validation {
                message: format!("Invalid scan type '{}', please use 'test' or 'monitor'", s),
            }),
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanType::Test => write!(f, "test"),
            ScanType::Monitor => write!(f, "monitor"),
        }
    }
}

/// ScanRequest - Request DTO for the scan use case
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub scan_type: ScanType,
    pub org_id: String,
}

impl ScanRequest {
    pub fn new(scan_type: ScanType, org_id: impl Into<String>) -> Self {
        Self {
            scan_type,
            org_id: org_id.into(),
        }
    }
}

/// ScanResponse - Result of a finished scan
#[derive(Debug, Clone)]
pub struct ScanResponse {
    pub job_id: String,
    pub status: ScanStatus,
    pub results: Value,
}
