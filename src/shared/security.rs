use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size accepted for a Bazel query document (512 MB).
///
/// `deps(//...)` queries over large monorepos routinely produce tens of
/// megabytes of XML; anything past this limit is rejected before reading.
pub const MAX_INPUT_SIZE: u64 = 512 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// A missing path is not an error here; callers check existence separately.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            anyhow::bail!(
                "Failed to read metadata for {} operation on {}: {}",
                operation,
                path.display(),
                e
            )
        }
    };

    if metadata.is_symlink() {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("Symbolic links are not allowed for {} operations", operation),
            hint: "Pass the resolved path of a regular file instead".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// - `InvalidInputPath` if the path does not exist or is not a regular file
/// - `SecurityError` if the path is a symbolic link
pub fn validate_regular_file(path: &Path) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SbomError::InvalidInputPath {
        path: path.to_path_buf(),
        reason: if e.kind() == std::io::ErrorKind::NotFound {
            "File does not exist".to_string()
        } else {
            format!("Failed to read path metadata: {}", e)
        },
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: "Input path is a symbolic link".to_string(),
            hint: "Pass the resolved path of the query output instead".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(SbomError::InvalidInputPath {
            path: path.to_path_buf(),
            reason: "Not a regular file".to_string(),
        }
        .into());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Narrow the Bazel query to the target you want to describe".to_string(),
        }
        .into());
    }
    Ok(())
}
