//! bazel-sbom - SBOM generation tool for Bazel builds
//!
//! This library converts the XML written by `bazel query --output=xml` into a
//! CycloneDX 1.6 SBOM and can submit the result to Snyk for a vulnerability
//! test, following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Rule graph, package identities and SBOM model
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use bazel_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = ConvertToSbomUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());
//!
//! let request = ConvertRequest::new(PathBuf::from("deps.xml"))
//!     .with_project_version(Some("1.0.0".to_string()));
//! let response = use_case.execute(request)?;
//!
//! let formatter = CycloneDxFormatter::new();
//! let output = formatter.format(&response.document, &response.metadata)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, SitePackagesEnricher, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::CycloneDxFormatter;
    pub use crate::adapters::outbound::network::{SnykClient, SnykConfig};
    pub use crate::application::dto::{
        ConvertRequest, ConvertResponse, ScanRequest, ScanResponse, ScanType,
    };
    pub use crate::application::use_cases::{ConvertToSbomUseCase, RunScanUseCase, ScanSettings};
    pub use crate::ports::inbound::SbomConversionPort;
    pub use crate::ports::outbound::{
        OutputPresenter, PackageEnricher, ProgressReporter, QueryReader, SbomFormatter,
        ScanRepository, ScanStatus,
    };
    pub use crate::sbom_generation::domain::{
        BuildWarning, DependencyRecord, PackageIdentity, RuleGraph, SbomDocument, SbomMetadata,
    };
    pub use crate::sbom_generation::services::{
        DependencyGraphBuilder, RuleGraphParser, SbomAssembler, SbomGenerator,
    };
    pub use crate::shared::Result;
}
