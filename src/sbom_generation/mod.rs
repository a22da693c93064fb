/// Core SBOM generation layer
///
/// `domain` holds the rule graph, package identities and the SBOM document;
/// `services` holds the pure pipeline stages that connect them.
pub mod domain;
pub mod services;
