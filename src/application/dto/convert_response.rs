use crate::sbom_generation::domain::{BuildWarning, SbomDocument, SbomMetadata};
use crate::sbom_generation::services::TraversalMode;

/// ConvertResponse - Response DTO from the conversion use case
///
/// Carries the validated document and its metadata, ready for a formatter.
#[derive(Debug, Clone)]
pub struct ConvertResponse {
    pub document: SbomDocument,
    pub metadata: SbomMetadata,
    /// Every recoverable problem met on the way, in pipeline order
    pub warnings: Vec<BuildWarning>,
    pub mode: TraversalMode,
    /// Number of PyPI versions filled in from installed packages
    pub enriched_count: usize,
}
