use std::path::PathBuf;

/// Version given to the root component when none is configured
pub const DEFAULT_PROJECT_VERSION: &str = "0.0.0";

/// ConvertRequest - Request DTO for the conversion use case
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// Path to the `bazel query --output=xml` document
    pub input_path: PathBuf,
    /// Version of the root application component
    pub project_version: String,
}

impl ConvertRequest {
    pub fn new(input_path: PathBuf) -> Self {
        Self {
            input_path,
            project_version: DEFAULT_PROJECT_VERSION.to_string(),
        }
    }

    pub fn with_project_version(mut self, project_version: Option<String>) -> Self {
        if let Some(version) = project_version.filter(|v| !v.trim().is_empty()) {
            self.project_version = version;
        }
        self
    }
}
