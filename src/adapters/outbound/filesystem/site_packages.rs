use crate::ports::outbound::PackageEnricher;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const DIST_INFO_SUFFIX: &str = ".dist-info";

/// SitePackagesEnricher adapter for resolving versions from an installed environment
///
/// Indexes the `*.dist-info` directories of a `site-packages` directory once
/// at construction. Names are compared after PEP 503 normalization, so
/// `Typing_Extensions` and `typing-extensions` match.
pub struct SitePackagesEnricher {
    versions: HashMap<String, String>,
}

impl SitePackagesEnricher {
    /// Scans `site_packages` for installed distributions
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed
    pub fn from_dir(site_packages: &Path) -> Result<Self> {
        let entries = fs::read_dir(site_packages).map_err(|e| SbomError::FileReadError {
            path: site_packages.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut versions = HashMap::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_dist_info = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(DIST_INFO_SUFFIX));
            if !is_dist_info || !path.is_dir() {
                continue;
            }
            if let Some((name, version)) = read_distribution(&path) {
                versions.insert(normalize_name(&name), version);
            }
        }

        tracing::debug!(
            path = %site_packages.display(),
            distributions = versions.len(),
            "indexed installed packages"
        );
        Ok(Self { versions })
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl PackageEnricher for SitePackagesEnricher {
    fn installed_version(&self, package_name: &str) -> Option<String> {
        self.versions.get(&normalize_name(package_name)).cloned()
    }
}

/// Reads name and version from `METADATA`, falling back to the directory name
fn read_distribution(dist_info: &Path) -> Option<(String, String)> {
    if let Ok(metadata) = fs::read_to_string(dist_info.join("METADATA")) {
        let mut name = None;
        let mut version = None;
        for line in metadata.lines() {
            if line.is_empty() {
                break;
            }
            if let Some(value) = line.strip_prefix("Name:") {
                name.get_or_insert_with(|| value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("Version:") {
                version.get_or_insert_with(|| value.trim().to_string());
            }
        }
        if let (Some(name), Some(version)) = (name, version) {
            if !name.is_empty() && !version.is_empty() {
                return Some((name, version));
            }
        }
    }

    let dir_name = dist_info.file_name()?.to_str()?;
    let stem = dir_name.strip_suffix(DIST_INFO_SUFFIX)?;
    let (name, version) = stem.split_once('-')?;
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name.to_string(), version.to_string()))
}

/// PEP 503 name normalization: lowercase, runs of `-`, `_`, `.` become `-`
fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut previous_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !previous_separator {
                normalized.push('-');
            }
            previous_separator = true;
        } else {
            normalized.extend(c.to_lowercase());
            previous_separator = false;
        }
    }
    normalized
}
