/// Formatters for SBOM output
mod cyclonedx_formatter;

pub use cyclonedx_formatter::CycloneDxFormatter;
