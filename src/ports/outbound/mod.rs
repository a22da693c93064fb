/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod formatter;
pub mod output_presenter;
pub mod package_enricher;
pub mod progress_reporter;
pub mod query_reader;
pub mod scan_repository;

pub use formatter::SbomFormatter;
pub use output_presenter::OutputPresenter;
pub use package_enricher::PackageEnricher;
pub use progress_reporter::ProgressReporter;
pub use query_reader::QueryReader;
pub use scan_repository::{ScanRepository, ScanStatus};
