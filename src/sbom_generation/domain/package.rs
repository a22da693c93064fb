use std::fmt;

/// Version reported when a package's tags do not carry one
pub const UNKNOWN_VERSION: &str = "unknown";

/// Package ecosystem a Bazel rule was resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    Maven,
    PyPi,
    Unknown,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Maven => "maven",
            Ecosystem::PyPi => "pypi",
            Ecosystem::Unknown => "unknown",
        }
    }

    /// Package URL type for this ecosystem
    pub fn purl_type(&self) -> &'static str {
        match self {
            Ecosystem::Maven => "maven",
            Ecosystem::PyPi => "pypi",
            Ecosystem::Unknown => "generic",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PackageIdentity value object resolved from a rule's tags
///
/// Maven keeps group and artifact apart so package URLs never have to
/// re-split the dotted display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageIdentity {
    Maven {
        group: String,
        artifact: String,
        version: String,
    },
    PyPi {
        name: String,
        version: String,
    },
}

impl PackageIdentity {
    pub fn maven(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        PackageIdentity::Maven {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    pub fn pypi(name: impl Into<String>, version: impl Into<String>) -> Self {
        PackageIdentity::PyPi {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Display name: `group.artifact` for Maven, the distribution name for PyPI
    pub fn name(&self) -> String {
        match self {
            PackageIdentity::Maven {
                group, artifact, ..
            } => format!("{}.{}", group, artifact),
            PackageIdentity::PyPi { name, .. } => name.clone(),
        }
    }

    pub fn version(&self) -> &str {
        match self {
            PackageIdentity::Maven { version, .. } | PackageIdentity::PyPi { version, .. } => {
                version
            }
        }
    }

    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            PackageIdentity::Maven { .. } => Ecosystem::Maven,
            PackageIdentity::PyPi { .. } => Ecosystem::PyPi,
        }
    }

    /// Returns a copy carrying a different version
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        let version = version.into();
        match self {
            PackageIdentity::Maven {
                group, artifact, ..
            } => PackageIdentity::maven(group.clone(), artifact.clone(), version),
            PackageIdentity::PyPi { name, .. } => PackageIdentity::pypi(name.clone(), version),
        }
    }

    pub fn purl(&self) -> String {
        match self {
            PackageIdentity::Maven {
                group,
                artifact,
                version,
            } => format!(
                "pkg:maven/{}/{}{}",
                urlencoding::encode(group),
                urlencoding::encode(artifact),
                version_suffix(version)
            ),
            PackageIdentity::PyPi { name, version } => package_url("pypi", name, version),
        }
    }
}

/// Builds a flat package URL (`pkg:{type}/{name}@{version}`)
///
/// The version qualifier is left out when the version is unknown.
pub fn package_url(purl_type: &str, name: &str, version: &str) -> String {
    format!(
        "pkg:{}/{}{}",
        purl_type,
        urlencoding::encode(name),
        version_suffix(version)
    )
}

fn version_suffix(version: &str) -> String {
    if version.is_empty() || version == UNKNOWN_VERSION {
        String::new()
    } else {
        format!("@{}", urlencoding::encode(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maven_identity_name_and_ecosystem() {
        let identity = PackageIdentity::maven("com.foo", "bar", "1.2.3");
        assert_eq!(identity.name(), "com.foo.bar");
        assert_eq!(identity.version(), "1.2.3");
        assert_eq!(identity.ecosystem(), Ecosystem::Maven);
    }

    #[test]
    fn test_maven_purl_keeps_group_and_artifact_apart() {
        let identity = PackageIdentity::maven("org.apache", "commons.lang3", "3.14.0");
        assert_eq!(
            identity.purl(),
            "pkg:maven/org.apache/commons.lang3@3.14.0"
        );
    }

    #[test]
    fn test_pypi_identity() {
        let identity = PackageIdentity::pypi("requests", "2.31.0");
        assert_eq!(identity.name(), "requests");
        assert_eq!(identity.ecosystem(), Ecosystem::PyPi);
        assert_eq!(identity.purl(), "pkg:pypi/requests@2.31.0");
    }

    #[test]
    fn test_purl_omits_unknown_version() {
        let identity = PackageIdentity::pypi("requests", UNKNOWN_VERSION);
        assert_eq!(identity.purl(), "pkg:pypi/requests");
    }

    #[test]
    fn test_package_url_encodes_segments() {
        assert_eq!(
            package_url("generic", "my app", "1.0+local"),
            "pkg:generic/my%20app@1.0%2Blocal"
        );
    }

    #[test]
    fn test_with_version_keeps_identity() {
        let identity = PackageIdentity::pypi("jinja2", UNKNOWN_VERSION).with_version("3.1.2");
        assert_eq!(identity, PackageIdentity::pypi("jinja2", "3.1.2"));

        let maven = PackageIdentity::maven("com.google.guava", "guava", "1").with_version("33.0.0");
        assert_eq!(maven.version(), "33.0.0");
        assert_eq!(maven.name(), "com.google.guava.guava");
    }

    #[test]
    fn test_ecosystem_strings() {
        assert_eq!(Ecosystem::Maven.to_string(), "maven");
        assert_eq!(Ecosystem::PyPi.to_string(), "pypi");
        assert_eq!(Ecosystem::Unknown.to_string(), "unknown");
        assert_eq!(Ecosystem::Unknown.purl_type(), "generic");
    }
}
