use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between invalid invocations
/// and failures that happened while converting or scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - SBOM written (and scan completed, if requested)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed input, scan API error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for SBOM generation and scanning.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Malformed Bazel query input: {details}\n\n💡 Hint: Generate the input with `bazel query --output=xml 'deps(//your:target)'`")]
    MalformedInput { details: String },

    #[error("SBOM assembly failed: {details}\n\n💡 Hint: This indicates an internal inconsistency; please report it with the input file")]
    Assembly { details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid input path: {path}\nReason: {reason}\n\n💡 Hint: Please specify the XML file produced by `bazel query --output=xml`")]
    InvalidInputPath { path: PathBuf, reason: String },

    /// Validation error for configuration and command options
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unsupported scan type: {scan_type}\n\n💡 Hint: Only 'test' scans are currently supported")]
    UnsupportedScanType { scan_type: String },

    #[error("Scan API error: {details}\n\n💡 Hint: Check your SNYK_TOKEN, organization ID and region")]
    ScanApi { details: String },

    #[error("Timed out after {elapsed_secs}s waiting for scan job {job_id}\n\n💡 Hint: Increase scan.timeout_secs in the config file, the SBOM file was still written")]
    ScanTimeout { job_id: String, elapsed_secs: u64 },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
