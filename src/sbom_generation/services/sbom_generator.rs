use crate::sbom_generation::domain::{SbomMetadata, ToolInfo};
use chrono::{SecondsFormat, Utc};

const GENERATOR_NAME: &str = "bazel-sbom";

/// SbomGenerator service for generating SBOM metadata
///
/// This service contains pure business logic for SBOM metadata generation.
/// It lists the generator and Bazel as tools and records the build host.
pub struct SbomGenerator;

impl SbomGenerator {
    /// Generates SBOM metadata with the current UTC timestamp
    ///
    /// # Arguments
    /// * `tool_name` - Name of the tool generating the SBOM
    /// * `tool_version` - Version of the tool
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> SbomMetadata {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let tools = vec![
            ToolInfo {
                name: tool_name.to_string(),
                version: tool_version.to_string(),
                vendor: None,
            },
            ToolInfo {
                name: "bazel".to_string(),
                version: "latest".to_string(),
                vendor: None,
            },
        ];

        let properties = vec![
            ("build.system".to_string(), "bazel".to_string()),
            ("build.platform".to_string(), std::env::consts::OS.to_string()),
            ("build.architecture".to_string(), std::env::consts::ARCH.to_string()),
            ("sbom.generator".to_string(), tool_name.to_string()),
            ("sbom.version".to_string(), tool_version.to_string()),
        ];

        SbomMetadata::new(timestamp, tools, properties)
    }

    /// Generates SBOM metadata with default tool information (bazel-sbom)
    ///
    /// This uses the compile-time version from Cargo.toml
    pub fn generate_default_metadata() -> SbomMetadata {
        Self::generate_metadata(GENERATOR_NAME, env!("CARGO_PKG_VERSION"))
    }
}
