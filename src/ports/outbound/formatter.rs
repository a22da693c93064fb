use crate::sbom_generation::domain::{SbomDocument, SbomMetadata};
use crate::shared::Result;

/// SbomFormatter port for formatting SBOM output
///
/// This port abstracts the serialization of a validated SBOM document
/// (CycloneDX JSON today).
pub trait SbomFormatter {
    /// Formats the document together with its metadata
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, document: &SbomDocument, metadata: &SbomMetadata) -> Result<String>;
}
