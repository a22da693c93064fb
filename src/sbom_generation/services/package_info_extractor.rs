use crate::sbom_generation::domain::{PackageIdentity, UNKNOWN_VERSION};

const MAVEN_COORDINATES_PREFIX: &str = "maven_coordinates=";
const PYPI_NAME_PREFIX: &str = "pypi_name=";
const PYPI_VERSION_PREFIX: &str = "pypi_version=";

/// PackageInfoExtractor service for resolving package identity from rule tags
///
/// rules_jvm_external tags imported jars with `maven_coordinates=group:artifact:version`,
/// and pip-generated rules carry `pypi_name=` / `pypi_version=` tags.
pub struct PackageInfoExtractor;

impl PackageInfoExtractor {
    /// Scans tags in order and returns the identity of the first recognized tag
    ///
    /// Maven coordinates with fewer than three `:`-separated parts are ignored and
    /// the scan continues. A PyPI name takes its version from the first
    /// `pypi_version=` tag anywhere in the list, defaulting to `unknown`.
    ///
    /// # Returns
    /// `None` when no tag identifies a package
    pub fn extract(tags: &[String]) -> Option<PackageIdentity> {
        for tag in tags {
            if let Some(coordinates) = tag.strip_prefix(MAVEN_COORDINATES_PREFIX) {
                let parts: Vec<&str> = coordinates.split(':').collect();
                if parts.len() >= 3 {
                    return Some(PackageIdentity::maven(parts[0], parts[1], parts[2]));
                }
            } else if let Some(name) = tag.strip_prefix(PYPI_NAME_PREFIX) {
                if name.is_empty() {
                    continue;
                }
                let version = tags
                    .iter()
                    .find_map(|t| t.strip_prefix(PYPI_VERSION_PREFIX))
                    .unwrap_or(UNKNOWN_VERSION);
                return Some(PackageIdentity::pypi(name, version));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::Ecosystem;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_extract_maven_coordinates() {
        let identity = PackageInfoExtractor::extract(&tags(&["maven_coordinates=com.foo:bar:1.2.3"])).unwrap();
        assert_eq!(identity.name(), "com.foo.bar");
        assert_eq!(identity.version(), "1.2.3");
        assert_eq!(identity.ecosystem(), Ecosystem::Maven);
        assert_eq!(identity, PackageIdentity::maven("com.foo", "bar", "1.2.3"));
    }

    #[test]
    fn test_extract_pypi_name_and_version() {
        let identity =
            PackageInfoExtractor::extract(&tags(&["pypi_name=requests", "pypi_version=2.31.0"])).unwrap();
        assert_eq!(identity.name(), "requests");
        assert_eq!(identity.version(), "2.31.0");
        assert_eq!(identity.ecosystem(), Ecosystem::PyPi);
    }

    #[test]
    fn test_extract_pypi_version_before_name() {
        let identity =
            PackageInfoExtractor::extract(&tags(&["pypi_version=0.4.6", "pypi_name=colorama"])).unwrap();
        assert_eq!(identity, PackageIdentity::pypi("colorama", "0.4.6"));
    }

    #[test]
    fn test_extract_pypi_without_version() {
        let identity = PackageInfoExtractor::extract(&tags(&["pypi_name=six"])).unwrap();
        assert_eq!(identity.version(), UNKNOWN_VERSION);
    }

    #[test]
    fn test_extract_unrecognized_tags() {
        assert!(PackageInfoExtractor::extract(&tags(&["other=x"])).is_none());
        assert!(PackageInfoExtractor::extract(&[]).is_none());
    }

    #[test]
    fn test_extract_short_maven_coordinates_keeps_scanning() {
        let identity = PackageInfoExtractor::extract(&tags(&[
            "maven_coordinates=com.foo:bar",
            "pypi_name=fallback",
            "pypi_version=1.0",
        ]))
        .unwrap();
        assert_eq!(identity, PackageIdentity::pypi("fallback", "1.0"));

        assert!(PackageInfoExtractor::extract(&tags(&["maven_coordinates=com.foo:bar"])).is_none());
    }

    #[test]
    fn test_extract_first_matching_tag_wins() {
        let maven_first = PackageInfoExtractor::extract(&tags(&[
            "maven_coordinates=org.slf4j:slf4j-api:2.0.9",
            "pypi_name=foo",
        ]))
        .unwrap();
        assert_eq!(maven_first.ecosystem(), Ecosystem::Maven);

        let pypi_first = PackageInfoExtractor::extract(&tags(&[
            "pypi_name=foo",
            "maven_coordinates=org.slf4j:slf4j-api:2.0.9",
        ]))
        .unwrap();
        assert_eq!(pypi_first.ecosystem(), Ecosystem::PyPi);
    }

    #[test]
    fn test_extract_maven_with_packaging_uses_third_part() {
        let identity =
            PackageInfoExtractor::extract(&tags(&["maven_coordinates=io.grpc:grpc-core:1.60.0:jar"])).unwrap();
        assert_eq!(identity.version(), "1.60.0");
    }

    #[test]
    fn test_extract_requires_prefix() {
        assert!(PackageInfoExtractor::extract(&tags(&["x-pypi_name=foo"])).is_none());
        assert!(PackageInfoExtractor::extract(&tags(&["pypi_name="])).is_none());
    }
}
