mod cli;

use bazel_sbom::adapters::outbound::console::StderrProgressReporter;
use bazel_sbom::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, SitePackagesEnricher, StdoutPresenter,
};
use bazel_sbom::adapters::outbound::formatters::CycloneDxFormatter;
use bazel_sbom::adapters::outbound::network::{SnykClient, SnykConfig, DEFAULT_REGION};
use bazel_sbom::application::dto::{ConvertRequest, ScanRequest, ScanType};
use bazel_sbom::application::use_cases::{ConvertToSbomUseCase, RunScanUseCase, ScanSettings};
use bazel_sbom::config::{self, ConfigFile};
use bazel_sbom::ports::inbound::SbomConversionPort;
use bazel_sbom::ports::outbound::{OutputPresenter, SbomFormatter};
use bazel_sbom::shared::error::{ExitCode, SbomError};
use bazel_sbom::shared::Result;
use cli::{Args, Command, ConvertArgs, ScanArgs};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// Environment variable holding the Snyk API token
const SNYK_TOKEN_ENV: &str = "SNYK_TOKEN";

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    match args.command {
        Command::Convert(convert_args) => {
            convert_and_write(&convert_args, &config)?;
            Ok(())
        }
        Command::Scan(scan_args) => run_scan(&scan_args, &config).await,
    }
}

/// Explicit `--config` must exist; otherwise the working directory is searched
fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        return config::load_config_from_path(path);
    }
    let cwd = std::env::current_dir()?;
    Ok(config::discover_config(&cwd)?.unwrap_or_default())
}

/// Converts the query and writes the SBOM, returning the formatted JSON
fn convert_and_write(args: &ConvertArgs, config: &ConfigFile) -> Result<String> {
    let mut use_case =
        ConvertToSbomUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());

    let site_packages = args
        .site_packages
        .clone()
        .or_else(|| config.site_packages.clone());
    if let Some(dir) = site_packages {
        let enricher = SitePackagesEnricher::from_dir(&dir)?;
        eprintln!(
            "🐍 Indexed {} installed package(s) from {}",
            enricher.len(),
            dir.display()
        );
        use_case = use_case.with_enricher(Box::new(enricher));
    }

    let project_version = args
        .project_version
        .clone()
        .or_else(|| config.project_version.clone());
    let request = ConvertRequest::new(args.input.clone()).with_project_version(project_version);

    let response = use_case.convert(request)?;

    eprintln!("📝 Generating CycloneDX JSON format output...");
    let formatted = CycloneDxFormatter::new().format(&response.document, &response.metadata)?;

    let presenter: Box<dyn OutputPresenter> = if args.writes_to_stdout() {
        Box::new(StdoutPresenter::new())
    } else {
        Box::new(FileSystemWriter::new(PathBuf::from(&args.output)))
    };
    presenter.present(&formatted)?;

    if !args.writes_to_stdout() {
        eprintln!("✅ Output complete: {}", args.output);
    }
    Ok(formatted)
}

async fn run_scan(args: &ScanArgs, config: &ConfigFile) -> Result<()> {
    // Everything that can be checked locally fails before any output is written
    if args.scan_type != ScanType::Test {
        return Err(SbomError::UnsupportedScanType {
            scan_type: args.scan_type.to_string(),
        }
        .into());
    }

    // Scan results go to stdout, so the SBOM needs a file of its own
    if args.convert.writes_to_stdout() {
        return Err(SbomError::Validation {
            message: "scan writes its results to stdout, please give the SBOM an output file instead of '-'".to_string(),
        }
        .into());
    }

    let scan_config = config.scan.as_ref();
    let org_id = args
        .org_id
        .clone()
        .or_else(|| scan_config.and_then(|s| s.org_id.clone()))
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| SbomError::Validation {
            message: "A Snyk organization ID is required for scans (--org-id or scan.org_id in the config file)".to_string(),
        })?;

    let token = std::env::var(SNYK_TOKEN_ENV)
        .ok()
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| SbomError::Validation {
            message: format!("{} must be set to run a Snyk scan", SNYK_TOKEN_ENV),
        })?;

    let region = args
        .region
        .clone()
        .or_else(|| scan_config.and_then(|s| s.region.clone()))
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    let mut settings = ScanSettings::default();
    if let Some(secs) = scan_config.and_then(|s| s.poll_interval_secs) {
        settings.poll_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = scan_config.and_then(|s| s.timeout_secs) {
        settings.timeout = Duration::from_secs(secs);
    }

    let formatted = convert_and_write(&args.convert, config)?;
    let sbom: serde_json::Value = serde_json::from_str(&formatted)?;

    tracing::debug!(%region, %org_id, "starting Snyk scan");
    let client = SnykClient::new(SnykConfig::new(region, token))?;
    let use_case = RunScanUseCase::new(client, StderrProgressReporter::new(), settings);
    let response = use_case
        .execute(ScanRequest::new(args.scan_type, org_id), &sbom)
        .await?;

    println!("{}", serde_json::to_string_pretty(&response.results)?);
    Ok(())
}
