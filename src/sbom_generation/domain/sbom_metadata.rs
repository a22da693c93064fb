/// Tool entry listed in the SBOM metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub vendor: Option<String>,
}

/// SbomMetadata value object representing SBOM metadata
#[derive(Debug, Clone)]
pub struct SbomMetadata {
    timestamp: String,
    tools: Vec<ToolInfo>,
    properties: Vec<(String, String)>,
}

impl SbomMetadata {
    pub fn new(timestamp: String, tools: Vec<ToolInfo>, properties: Vec<(String, String)>) -> Self {
        Self {
            timestamp,
            tools,
            properties,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tools(&self) -> &[ToolInfo] {
        &self.tools
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sbom_metadata_new() {
        let metadata = SbomMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            vec![ToolInfo {
                name: "bazel-sbom".to_string(),
                version: "2.0.0".to_string(),
                vendor: None,
            }],
            vec![("build.system".to_string(), "bazel".to_string())],
        );

        assert_eq!(metadata.timestamp(), "2024-01-01T00:00:00Z");
        assert_eq!(metadata.tools()[0].name, "bazel-sbom");
        assert_eq!(metadata.property("build.system"), Some("bazel"));
        assert_eq!(metadata.property("missing"), None);
    }
}
