use crate::shared::Result;
use std::path::Path;

/// QueryReader port for reading Bazel query output
///
/// This port abstracts the file system operations needed to read the
/// document produced by `bazel query --output=xml`.
pub trait QueryReader {
    /// Reads the query document at `path`
    ///
    /// # Returns
    /// The raw XML text
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file is a symlink or exceeds the size limit
    /// - The file cannot be read due to permissions or I/O errors
    fn read_query(&self, path: &Path) -> Result<String>;
}
