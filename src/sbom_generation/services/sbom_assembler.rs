use crate::sbom_generation::domain::sbom_document::ROOT_INDEX;
use crate::sbom_generation::domain::{
    package_url, BomRef, BuildWarning, ComponentType, DependencyEdge, DependencyRecord, Ecosystem,
    SbomComponent, SbomDocument,
};
use crate::shared::Result;
use std::collections::{HashMap, HashSet};

/// SbomAssembler service for turning dependency records into an SBOM document
///
/// The root component always takes index 1. Library components are numbered
/// from 2 in record order; records without a package identity are skipped
/// and do not consume an index.
pub struct SbomAssembler;

impl SbomAssembler {
    /// Builds and validates the SBOM document
    ///
    /// # Arguments
    /// * `root_name` - Name of the application component
    /// * `root_version` - Version of the application component
    /// * `records` - Library records in traversal order
    /// * `root_deps` - Rule names declared directly by the root rule
    ///
    /// # Returns
    /// The document plus an `UnrecognizedPackage` warning per skipped record
    ///
    /// # Errors
    /// Returns `SbomError::Assembly` when the finished document fails its
    /// referential integrity check.
    pub fn assemble(
        root_name: &str,
        root_version: &str,
        records: &[DependencyRecord],
        root_deps: &[String],
    ) -> Result<(SbomDocument, Vec<BuildWarning>)> {
        let mut warnings = Vec::new();
        let mut components = Vec::new();
        let mut emitted: Vec<(&DependencyRecord, BomRef)> = Vec::new();
        let mut by_rule: HashMap<&str, BomRef> = HashMap::new();
        let mut next_index = ROOT_INDEX + 1;

        for record in records {
            let identity = match record.identity() {
                Some(identity) => identity,
                None => {
                    tracing::debug!(rule = record.rule_name(), "record without package identity skipped");
                    warnings.push(BuildWarning::UnrecognizedPackage {
                        rule: record.rule_name().to_string(),
                        tags: record.tags().to_vec(),
                    });
                    continue;
                }
            };
            if by_rule.contains_key(record.rule_name()) {
                continue;
            }

            let name = identity.name();
            let bom_ref = BomRef::new(next_index, &name, identity.version());
            next_index += 1;

            let mut component = SbomComponent::new(
                bom_ref.clone(),
                name,
                identity.version().to_string(),
                ComponentType::Library,
                identity.purl(),
            )
            .with_property("bazel.rule", record.rule_name())
            .with_property("bazel.class", record.rule_class());
            if let Some(location) = record.location() {
                component = component.with_property("bazel.location", location);
            }

            components.push(component);
            by_rule.insert(record.rule_name(), bom_ref.clone());
            emitted.push((record, bom_ref));
        }

        let mut dependencies = Vec::with_capacity(emitted.len() + 1);
        let mut has_parent: HashSet<usize> = HashSet::new();

        for (record, bom_ref) in &emitted {
            let children = Self::resolve_children(record.direct_deps(), &by_rule, Some(bom_ref));
            has_parent.extend(children.iter().map(BomRef::index));
            dependencies.push(DependencyEdge::new(bom_ref.clone(), children));
        }

        let root_ref = BomRef::new(ROOT_INDEX, root_name, root_version);
        let mut root_children = Self::resolve_children(root_deps, &by_rule, None);
        root_children.extend(
            emitted
                .iter()
                .filter(|(_, bom_ref)| !has_parent.contains(&bom_ref.index()))
                .map(|(_, bom_ref)| bom_ref.clone()),
        );
        sort_and_dedup(&mut root_children);
        dependencies.push(DependencyEdge::new(root_ref.clone(), root_children));

        let root = SbomComponent::new(
            root_ref,
            root_name.to_string(),
            root_version.to_string(),
            ComponentType::Application,
            package_url(Self::root_purl_type(records), root_name, root_version),
        );

        let document = SbomDocument::new(root, components, dependencies)?;
        tracing::debug!(
            components = document.components().len(),
            skipped = warnings.len(),
            "SBOM document assembled"
        );
        Ok((document, warnings))
    }

    /// Maps declared rule names to emitted components, excluding `owner` itself
    fn resolve_children(
        deps: &[String],
        by_rule: &HashMap<&str, BomRef>,
        owner: Option<&BomRef>,
    ) -> Vec<BomRef> {
        let mut children: Vec<BomRef> = deps
            .iter()
            .filter_map(|dep| by_rule.get(dep.as_str()))
            .filter(|child| owner != Some(*child))
            .cloned()
            .collect();
        sort_and_dedup(&mut children);
        children
    }

    fn root_purl_type(records: &[DependencyRecord]) -> &'static str {
        let has = |ecosystem: Ecosystem| records.iter().any(|r| r.ecosystem() == ecosystem);
        if has(Ecosystem::Maven) {
            Ecosystem::Maven.purl_type()
        } else if has(Ecosystem::PyPi) {
            Ecosystem::PyPi.purl_type()
        } else {
            Ecosystem::Unknown.purl_type()
        }
    }
}

fn sort_and_dedup(refs: &mut Vec<BomRef>) {
    refs.sort_by_key(BomRef::index);
    refs.dedup_by_key(|r| r.index());
}
