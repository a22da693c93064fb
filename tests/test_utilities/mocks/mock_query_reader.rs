use bazel_sbom::prelude::*;
use std::path::Path;

/// Mock QueryReader for testing that returns predefined content
pub struct MockQueryReader {
    pub content: String,
    pub should_fail: bool,
}

impl MockQueryReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl QueryReader for MockQueryReader {
    fn read_query(&self, path: &Path) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock query read failure: {}", path.display());
        }
        Ok(self.content.clone())
    }
}
