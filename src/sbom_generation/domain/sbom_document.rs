use crate::shared::error::SbomError;
use crate::shared::Result;
use std::collections::HashSet;
use std::fmt;

/// Index carried by the root component's reference
pub const ROOT_INDEX: usize = 1;

/// Document-unique component reference, `{index}-{name}@{version}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BomRef {
    index: usize,
    value: String,
}

impl BomRef {
    pub fn new(index: usize, name: &str, version: &str) -> Self {
        Self {
            index,
            value: format!("{}-{}@{}", index, name, version),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for BomRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Application,
    Library,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Application => "application",
            ComponentType::Library => "library",
        }
    }
}

/// One CycloneDX component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomComponent {
    bom_ref: BomRef,
    name: String,
    version: String,
    component_type: ComponentType,
    purl: String,
    properties: Vec<(String, String)>,
}

impl SbomComponent {
    pub fn new(
        bom_ref: BomRef,
        name: String,
        version: String,
        component_type: ComponentType,
        purl: String,
    ) -> Self {
        Self {
            bom_ref,
            name,
            version,
            component_type,
            purl,
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: impl Into<String>) -> Self {
        self.properties.push((name.to_string(), value.into()));
        self
    }

    pub fn bom_ref(&self) -> &BomRef {
        &self.bom_ref
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn purl(&self) -> &str {
        &self.purl
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }
}

/// Depends-on relation of one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    reference: BomRef,
    depends_on: Vec<BomRef>,
}

impl DependencyEdge {
    pub fn new(reference: BomRef, depends_on: Vec<BomRef>) -> Self {
        Self {
            reference,
            depends_on,
        }
    }

    pub fn reference(&self) -> &BomRef {
        &self.reference
    }

    pub fn depends_on(&self) -> &[BomRef] {
        &self.depends_on
    }
}

/// SbomDocument aggregate: root component, library components and edges
///
/// Components are kept in ascending index order and there is one edge entry
/// per component, root included, in the same order.
#[derive(Debug, Clone)]
pub struct SbomDocument {
    root: SbomComponent,
    components: Vec<SbomComponent>,
    dependencies: Vec<DependencyEdge>,
}

impl SbomDocument {
    /// Creates a document and checks its referential integrity
    ///
    /// # Errors
    /// Returns `SbomError::Assembly` if a reference is duplicated or if an edge
    /// points at a component that is not part of the document.
    pub fn new(
        root: SbomComponent,
        mut components: Vec<SbomComponent>,
        mut dependencies: Vec<DependencyEdge>,
    ) -> Result<Self> {
        components.sort_by_key(|c| c.bom_ref().index());
        dependencies.sort_by_key(|d| d.reference().index());
        for edge in &mut dependencies {
            edge.depends_on.sort_by_key(BomRef::index);
        }

        let document = Self {
            root,
            components,
            dependencies,
        };
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<()> {
        let mut known: HashSet<&str> = HashSet::new();
        for component in std::iter::once(&self.root).chain(&self.components) {
            if !known.insert(component.bom_ref().as_str()) {
                return Err(SbomError::Assembly {
                    details: format!("duplicate bom-ref {}", component.bom_ref()),
                }
                .into());
            }
        }

        for edge in &self.dependencies {
            let dangling = std::iter::once(edge.reference())
                .chain(edge.depends_on())
                .find(|r| !known.contains(r.as_str()));
            if let Some(missing) = dangling {
                return Err(SbomError::Assembly {
                    details: format!(
                        "dependency entry {} references {} which is not a component of the document",
                        edge.reference(),
                        missing
                    ),
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &SbomComponent {
        &self.root
    }

    pub fn components(&self) -> &[SbomComponent] {
        &self.components
    }

    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    pub fn find_component(&self, bom_ref: &str) -> Option<&SbomComponent> {
        std::iter::once(&self.root)
            .chain(&self.components)
            .find(|c| c.bom_ref().as_str() == bom_ref)
    }

    pub fn dependencies_of(&self, bom_ref: &str) -> Option<&[BomRef]> {
        self.dependencies
            .iter()
            .find(|d| d.reference().as_str() == bom_ref)
            .map(DependencyEdge::depends_on)
    }
}
