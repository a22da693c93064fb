use super::{Ecosystem, PackageIdentity, Rule, UNKNOWN_VERSION};

/// DependencyRecord entity: one library rule selected for the SBOM
///
/// Records are never edited in place; enrichment produces a new record
/// through [`DependencyRecord::with_identity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    rule_name: String,
    rule_class: String,
    identity: Option<PackageIdentity>,
    direct_deps: Vec<String>,
    tags: Vec<String>,
    location: Option<String>,
}

impl DependencyRecord {
    pub fn new(rule: &Rule, identity: Option<PackageIdentity>) -> Self {
        Self {
            rule_name: rule.name().to_string(),
            rule_class: rule.class().to_string(),
            identity,
            direct_deps: rule.declared_deps().to_vec(),
            tags: rule.tags().to_vec(),
            location: rule.location().map(String::from),
        }
    }

    pub fn with_identity(&self, identity: PackageIdentity) -> Self {
        Self {
            identity: Some(identity),
            ..self.clone()
        }
    }

    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    pub fn rule_class(&self) -> &str {
        &self.rule_class
    }

    pub fn identity(&self) -> Option<&PackageIdentity> {
        self.identity.as_ref()
    }

    pub fn package_name(&self) -> Option<String> {
        self.identity.as_ref().map(PackageIdentity::name)
    }

    pub fn package_version(&self) -> &str {
        self.identity
            .as_ref()
            .map(PackageIdentity::version)
            .unwrap_or(UNKNOWN_VERSION)
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.identity
            .as_ref()
            .map(PackageIdentity::ecosystem)
            .unwrap_or(Ecosystem::Unknown)
    }

    pub fn direct_deps(&self) -> &[String] {
        &self.direct_deps
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
