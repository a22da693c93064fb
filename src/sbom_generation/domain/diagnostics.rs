use std::fmt;

/// Recoverable problem found while building the SBOM
///
/// Warnings never stop the pipeline: the affected rule or record is dropped
/// and a best-effort document is still produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// A `<rule>` element without a `class` or `name` attribute
    MissingIdentity {
        position: usize,
        class: Option<String>,
        name: Option<String>,
    },
    /// A rule name declared more than once; the later declaration wins
    DuplicateRule { name: String },
    /// A declared dependency that names a rule absent from the document
    DanglingReference { from: String, to: String },
    /// A library rule with neither tags nor dependencies
    EmptyRule { rule: String },
    /// A library rule whose tags identify no known package ecosystem
    UnrecognizedPackage { rule: String, tags: Vec<String> },
    /// No binary rule was found; every library rule is reported
    NoRootTarget,
    /// The root rule could not be looked up in the graph
    RootRuleMissing { rule: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::MissingIdentity {
                position,
                class,
                name,
            } => write!(
                f,
                "Skipping rule #{} with missing class or name (class: {}, name: {})",
                position,
                class.as_deref().unwrap_or("<none>"),
                name.as_deref().unwrap_or("<none>")
            ),
            BuildWarning::DuplicateRule { name } => {
                write!(f, "Rule {} is declared more than once, keeping the last declaration", name)
            }
            BuildWarning::DanglingReference { from, to } => {
                write!(f, "Dependency {} of {} not found in rules", to, from)
            }
            BuildWarning::EmptyRule { rule } => {
                write!(f, "Rule {} has no tags or dependencies, skipping", rule)
            }
            BuildWarning::UnrecognizedPackage { rule, tags } => write!(
                f,
                "Skipping {}: no maven or pypi coordinates in tags [{}]",
                rule,
                tags.join(", ")
            ),
            BuildWarning::NoRootTarget => write!(
                f,
                "No binary target found, collecting all library dependencies (reachability is not checked)"
            ),
            BuildWarning::RootRuleMissing { rule } => write!(
                f,
                "Root rule {} is not in the graph, collecting all library dependencies",
                rule
            ),
        }
    }
}
