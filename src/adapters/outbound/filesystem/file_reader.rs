use crate::ports::outbound::QueryReader;
use crate::shared::error::SbomError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_INPUT_SIZE};
use crate::shared::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// FileSystemReader adapter for reading Bazel query output from disk
///
/// This adapter implements the QueryReader port. Symlinks and files above
/// the size limit are rejected before anything is read.
pub struct FileSystemReader {
    max_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_INPUT_SIZE,
        }
    }

    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryReader for FileSystemReader {
    fn read_query(&self, path: &Path) -> Result<String> {
        let size = validate_regular_file(path)?;
        validate_file_size(size, path, self.max_size)?;

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => SbomError::MalformedInput {
                details: format!("{} is not valid UTF-8 text", path.display()),
            },
            _ => SbomError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            },
        })?;

        tracing::debug!(path = %path.display(), bytes = size, "read query document");
        Ok(content)
    }
}
