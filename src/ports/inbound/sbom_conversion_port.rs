use crate::application::dto::{ConvertRequest, ConvertResponse};
use crate::shared::Result;

/// SbomConversionPort - Inbound port for the Bazel query to SBOM conversion
///
/// This port defines the interface that external adapters (CLI, API, etc.)
/// use to trigger a conversion. It represents the application's public API.
pub trait SbomConversionPort {
    /// Converts a Bazel query document into an SBOM document
    ///
    /// # Arguments
    /// * `request` - Input path and root component options
    ///
    /// # Returns
    /// The validated document, its metadata and the warnings collected
    ///
    /// # Errors
    /// Returns an error if:
    /// - The input file cannot be read or is not a Bazel query document
    /// - The assembled document fails its integrity check
    fn convert(&self, request: ConvertRequest) -> Result<ConvertResponse>;
}
