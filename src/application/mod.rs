/// Application layer - Use cases and DTOs
///
/// Orchestrates the SBOM services for the `convert` and `scan` commands and
/// talks to infrastructure only through ports.
pub mod dto;
pub mod use_cases;
