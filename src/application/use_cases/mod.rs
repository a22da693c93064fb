/// Use cases module containing application business logic orchestration
mod convert_to_sbom;
mod run_scan;

pub use convert_to_sbom::ConvertToSbomUseCase;
pub use run_scan::{RunScanUseCase, ScanSettings};
