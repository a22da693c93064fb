mod dependency_graph_builder;
mod package_info_extractor;
mod rule_graph_parser;
mod sbom_assembler;
mod sbom_generator;

pub use dependency_graph_builder::{DependencyGraphBuilder, DependencyResolution, TraversalMode};
pub use package_info_extractor::PackageInfoExtractor;
pub use rule_graph_parser::{ParsedQuery, RuleGraphParser};
pub use sbom_assembler::SbomAssembler;
pub use sbom_generator::SbomGenerator;
