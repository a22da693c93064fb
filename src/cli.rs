use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bazel_sbom::application::dto::ScanType;

/// Output path value that selects stdout
pub const STDOUT_OUTPUT: &str = "-";

/// Generate CycloneDX SBOMs from Bazel query output
#[derive(Parser, Debug)]
#[command(name = "bazel-sbom")]
#[command(version)]
#[command(
    about = "Generate CycloneDX SBOMs from `bazel query --output=xml` and optionally test them with Snyk",
    long_about = None
)]
pub struct Args {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (defaults to ./bazel-sbom.config.yml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a Bazel XML query into a CycloneDX SBOM
    Convert(ConvertArgs),
    /// Convert, then submit the SBOM to Snyk and wait for the results
    Scan(ScanArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the Bazel dependency graph XML file
    pub input: PathBuf,

    /// Path where the CycloneDX SBOM JSON will be saved ('-' for stdout)
    pub output: String,

    /// Version of the root application component
    #[arg(long, value_name = "VERSION")]
    pub project_version: Option<String>,

    /// site-packages directory used to resolve unknown PyPI versions
    #[arg(long, value_name = "DIR")]
    pub site_packages: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    #[command(flatten)]
    pub convert: ConvertArgs,

    /// Snyk scan to run: 'test' or 'monitor' (not supported)
    #[arg(short = 's', long, value_name = "TYPE")]
    pub scan_type: ScanType,

    /// Snyk organization ID
    #[arg(long, value_name = "ID")]
    pub org_id: Option<String>,

    /// Snyk API host, e.g. api.eu.snyk.io
    #[arg(short, long, value_name = "HOST")]
    pub region: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl ConvertArgs {
    pub fn writes_to_stdout(&self) -> bool {
        self.output == STDOUT_OUTPUT
    }
}
