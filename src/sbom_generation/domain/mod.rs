pub mod dependency_record;
pub mod diagnostics;
pub mod package;
pub mod rule;
pub mod sbom_document;
pub mod sbom_metadata;

pub use dependency_record::DependencyRecord;
pub use diagnostics::BuildWarning;
pub use package::{package_url, Ecosystem, PackageIdentity, UNKNOWN_VERSION};
pub use rule::{RootTarget, Rule, RuleGraph, RuleKind};
pub use sbom_document::{BomRef, ComponentType, DependencyEdge, SbomComponent, SbomDocument};
pub use sbom_metadata::{SbomMetadata, ToolInfo};
