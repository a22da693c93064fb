use crate::sbom_generation::domain::{
    BuildWarning, DependencyRecord, RootTarget, Rule, RuleGraph, RuleKind,
};
use crate::sbom_generation::services::PackageInfoExtractor;
use std::collections::HashSet;

/// How the record set was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    /// Only library rules reachable from the root target
    RootDirected,
    /// Every library rule in the document, reachable or not
    Fallback,
}

/// Output of the dependency-graph builder
#[derive(Debug, Clone)]
pub struct DependencyResolution {
    /// Selected library records, deduplicated, in first-visit order
    pub records: Vec<DependencyRecord>,
    /// Declared deps of the root rule (empty in fallback mode)
    pub root_deps: Vec<String>,
    pub mode: TraversalMode,
    pub warnings: Vec<BuildWarning>,
}

/// DependencyGraphBuilder service for selecting the library rules of a build
///
/// Walks the rule graph depth-first from the root target with an explicit
/// stack. The visited set makes diamonds and cycles terminate, so every rule
/// yields at most one record.
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    pub fn build(graph: &RuleGraph, root: Option<&RootTarget>) -> DependencyResolution {
        let mut warnings = Vec::new();

        let root_rule = match root {
            Some(root) => match graph.get(root.rule_name()) {
                Some(rule) => Some(rule),
                None => {
                    warnings.push(BuildWarning::RootRuleMissing {
                        rule: root.rule_name().to_string(),
                    });
                    None
                }
            },
            None => {
                warnings.push(BuildWarning::NoRootTarget);
                None
            }
        };

        let (candidates, root_deps, mode) = match root_rule {
            Some(rule) => (
                Self::walk_from(graph, rule, &mut warnings),
                rule.declared_deps().to_vec(),
                TraversalMode::RootDirected,
            ),
            None => (
                graph
                    .iter()
                    .filter(|rule| rule.kind() == RuleKind::Library)
                    .collect(),
                Vec::new(),
                TraversalMode::Fallback,
            ),
        };

        let mut records = Vec::with_capacity(candidates.len());
        for rule in candidates {
            if rule.tags().is_empty() && rule.declared_deps().is_empty() {
                tracing::debug!(rule = rule.name(), "empty library rule dropped");
                warnings.push(BuildWarning::EmptyRule {
                    rule: rule.name().to_string(),
                });
                continue;
            }
            let identity = PackageInfoExtractor::extract(rule.tags());
            records.push(DependencyRecord::new(rule, identity));
        }

        tracing::debug!(
            records = records.len(),
            mode = ?mode,
            "dependency graph built"
        );

        DependencyResolution {
            records,
            root_deps,
            mode,
            warnings,
        }
    }

    /// Pre-order walk from `root`, children in declared order
    ///
    /// Returns the library rules reached, in first-visit order.
    fn walk_from<'g>(
        graph: &'g RuleGraph,
        root: &'g Rule,
        warnings: &mut Vec<BuildWarning>,
    ) -> Vec<&'g Rule> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut reported_dangling: HashSet<(&str, &str)> = HashSet::new();
        let mut libraries = Vec::new();
        let mut stack: Vec<&'g Rule> = vec![root];

        while let Some(rule) = stack.pop() {
            if !visited.insert(rule.name()) {
                continue;
            }

            if rule.kind() == RuleKind::Library {
                libraries.push(rule);
            }

            for dep in rule.declared_deps().iter().rev() {
                match graph.get(dep) {
                    Some(child) => {
                        if !visited.contains(child.name()) {
                            stack.push(child);
                        }
                    }
                    None => {
                        if reported_dangling.insert((rule.name(), dep.as_str())) {
                            warnings.push(BuildWarning::DanglingReference {
                                from: rule.name().to_string(),
                                to: dep.clone(),
                            });
                        }
                    }
                }
            }
        }

        libraries
    }
}
