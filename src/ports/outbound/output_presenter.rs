use crate::shared::Result;

/// OutputPresenter port for delivering the finished SBOM
///
/// Implementations write to a file or to stdout. The use case validates the
/// whole document before this is called, so a failure here never leaves a
/// half-converted result behind.
pub trait OutputPresenter {
    /// Writes the formatted CycloneDX JSON to its destination
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written, e.g. the
    /// parent directory is missing or the output path is a symbolic link
    fn present(&self, content: &str) -> Result<()>;
}
