use crate::application::dto::{ConvertRequest, ConvertResponse};
use crate::ports::inbound::SbomConversionPort;
use crate::ports::outbound::{PackageEnricher, ProgressReporter, QueryReader};
use crate::sbom_generation::domain::{DependencyRecord, Ecosystem, UNKNOWN_VERSION};
use crate::sbom_generation::services::{
    DependencyGraphBuilder, RuleGraphParser, SbomAssembler, SbomGenerator, TraversalMode,
};
use crate::shared::Result;

/// Component name used when the query has no binary target
const FALLBACK_ROOT_NAME: &str = "project";

/// ConvertToSbomUseCase - Core use case for Bazel query to SBOM conversion
///
/// Runs the pipeline read → parse → build graph → enrich (optional) →
/// assemble → metadata. Formatting and output stay with the caller.
///
/// # Type Parameters
/// * `QR` - QueryReader implementation
/// * `PR` - ProgressReporter implementation
pub struct ConvertToSbomUseCase<QR, PR> {
    query_reader: QR,
    progress_reporter: PR,
    package_enricher: Option<Box<dyn PackageEnricher>>,
}

impl<QR, PR> ConvertToSbomUseCase<QR, PR>
where
    QR: QueryReader,
    PR: ProgressReporter,
{
    /// Creates a new ConvertToSbomUseCase with injected dependencies
    pub fn new(query_reader: QR, progress_reporter: PR) -> Self {
        Self {
            query_reader,
            progress_reporter,
            package_enricher: None,
        }
    }

    /// Enables filling `unknown` PyPI versions from installed packages
    pub fn with_enricher(mut self, package_enricher: Box<dyn PackageEnricher>) -> Self {
        self.package_enricher = Some(package_enricher);
        self
    }

    /// Executes the conversion use case
    ///
    /// # Errors
    /// Returns an error if the input cannot be read, is not a Bazel query
    /// document, or the assembled SBOM fails its integrity check. Recoverable
    /// problems are reported as warnings instead.
    pub fn execute(&self, request: ConvertRequest) -> Result<ConvertResponse> {
        self.progress_reporter.report(&format!(
            "📖 Reading Bazel query output from: {}",
            request.input_path.display()
        ));
        let xml = self.query_reader.read_query(&request.input_path)?;

        let parsed = RuleGraphParser::parse(&xml)?;
        self.progress_reporter
            .report(&format!("✅ Parsed {} rule(s)", parsed.graph.len()));

        let root_name = parsed
            .root
            .as_ref()
            .map(|root| root.program_name().to_string())
            .unwrap_or_else(|| FALLBACK_ROOT_NAME.to_string());

        let resolution = DependencyGraphBuilder::build(&parsed.graph, parsed.root.as_ref());
        if resolution.mode == TraversalMode::RootDirected {
            self.progress_reporter.report(&format!(
                "🔗 Found {} library dependencies of {}",
                resolution.records.len(),
                root_name
            ));
        }

        let (records, enriched_count) = self.enrich_records(resolution.records);

        let (document, assembly_warnings) = SbomAssembler::assemble(
            &root_name,
            &request.project_version,
            &records,
            &resolution.root_deps,
        )?;

        let mut warnings = parsed.warnings;
        warnings.extend(resolution.warnings);
        warnings.extend(assembly_warnings);
        for warning in &warnings {
            tracing::debug!(%warning, "build warning");
            self.progress_reporter.report_warning(&warning.to_string());
        }

        let metadata = SbomGenerator::generate_default_metadata();
        self.progress_reporter.report(&format!(
            "📦 Generated SBOM for {} with {} component(s)",
            root_name,
            document.components().len()
        ));

        Ok(ConvertResponse {
            document,
            metadata,
            warnings,
            mode: resolution.mode,
            enriched_count,
        })
    }

    /// Replaces `unknown` PyPI versions with installed ones
    fn enrich_records(&self, records: Vec<DependencyRecord>) -> (Vec<DependencyRecord>, usize) {
        let enricher = match &self.package_enricher {
            Some(enricher) => enricher,
            None => return (records, 0),
        };

        let mut enriched_count = 0;
        let records = records
            .into_iter()
            .map(|record| {
                let installed = record
                    .identity()
                    .filter(|identity| {
                        identity.ecosystem() == Ecosystem::PyPi
                            && identity.version() == UNKNOWN_VERSION
                    })
                    .and_then(|identity| {
                        let name = identity.name();
                        let version = enricher.installed_version(&name)?;
                        tracing::debug!(package = %name, %version, "version from installed package");
                        Some(identity.with_version(version))
                    });
                match installed {
                    Some(identity) => {
                        enriched_count += 1;
                        record.with_identity(identity)
                    }
                    None => record,
                }
            })
            .collect();

        if enriched_count > 0 {
            self.progress_reporter.report(&format!(
                "🔍 Resolved {} version(s) from installed packages",
                enriched_count
            ));
        }
        (records, enriched_count)
    }
}

impl<QR, PR> SbomConversionPort for ConvertToSbomUseCase<QR, PR>
where
    QR: QueryReader,
    PR: ProgressReporter,
{
    fn convert(&self, request: ConvertRequest) -> Result<ConvertResponse> {
        self.execute(request)
    }
}
