//! Configuration file support for bazel-sbom.
//!
//! Provides YAML-based configuration through `bazel-sbom.config.yml` files,
//! including data structures, file loading, and validation. Command-line
//! values always take precedence over the file.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bazel-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub project_version: Option<String>,
    pub site_packages: Option<PathBuf>,
    pub scan: Option<ScanConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

/// `scan:` section of the configuration file.
#[derive(Debug, Deserialize, Default)]
pub struct ScanConfig {
    pub region: Option<String>,
    pub org_id: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Dotted names of every field the schema does not know.
    pub fn unknown_field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.unknown_fields.keys().cloned().collect();
        if let Some(scan) = &self.scan {
            names.extend(scan.unknown_fields.keys().map(|key| format!("scan.{}", key)));
        }
        names
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(scan) = &config.scan {
        for (field, value) in [
            ("poll_interval_secs", scan.poll_interval_secs),
            ("timeout_secs", scan.timeout_secs),
        ] {
            if value == Some(0) {
                bail!(
                    "Invalid config: scan.{} must be greater than 0.\n\n\
                     💡 Hint: Remove the field to use the default or set a positive number of seconds.",
                    field
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_field_names() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
project_version: 1.2.3
site_packages: /opt/venv/lib/python3.11/site-packages
scan:
  region: api.eu.snyk.io
  org_id: 00000000-0000-0000-0000-000000000000
  poll_interval_secs: 10
  timeout_secs: 600
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.project_version.as_deref(), Some("1.2.3"));
        assert_eq!(
            config.site_packages,
            Some(PathBuf::from("/opt/venv/lib/python3.11/site-packages"))
        );
        let scan = config.scan.unwrap();
        assert_eq!(scan.region.as_deref(), Some("api.eu.snyk.io"));
        assert_eq!(
            scan.org_id.as_deref(),
            Some("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(scan.poll_interval_secs, Some(10));
        assert_eq!(scan.timeout_secs, Some(600));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "project_version: \"2.0\"\n").unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_some());
        assert_eq!(config.unwrap().project_version.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_empty_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.project_version.is_none());
        assert!(config.scan.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_poll_interval_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "scan:\n  poll_interval_secs: 0\n").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("scan.poll_interval_secs must be greater than 0"));
    }

    #[test]
    fn test_zero_timeout_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "scan:\n  timeout_secs: 0\n").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("scan.timeout_secs"));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
project_version: "1.0"
unknown_field: true
scan:
  org_id: org
  token: should-not-be-here
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 1);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert_eq!(
            config.unknown_field_names(),
            vec!["unknown_field".to_string(), "scan.token".to_string()]
        );
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.project_version.is_none());
        assert!(config.site_packages.is_none());
        assert!(config.scan.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
