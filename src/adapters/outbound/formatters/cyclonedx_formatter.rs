use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::{SbomComponent, SbomDocument, SbomMetadata};
use crate::shared::Result;
use serde::Serialize;

const SCHEMA_URL: &str = "http://cyclonedx.org/schema/bom-1.6.schema.json";

#[derive(Debug, Serialize)]
struct Bom {
    #[serde(rename = "$schema")]
    schema: &'static str,
    #[serde(rename = "bomFormat")]
    bom_format: &'static str,
    #[serde(rename = "specVersion")]
    spec_version: &'static str,
    version: u32,
    metadata: Metadata,
    components: Vec<Component>,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tools: Vec<Tool>,
    component: Component,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    properties: Vec<Property>,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor: Option<String>,
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct Component {
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    #[serde(rename = "type")]
    component_type: &'static str,
    name: String,
    version: String,
    purl: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    properties: Vec<Property>,
}

#[derive(Debug, Serialize)]
struct Property {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct Dependency {
    #[serde(rename = "ref")]
    bom_ref: String,
    #[serde(rename = "dependsOn", skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
}

/// CycloneDxFormatter adapter for generating CycloneDX 1.6 JSON format
///
/// This adapter implements the SbomFormatter port for CycloneDX format.
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxFormatter {
    fn format(&self, document: &SbomDocument, metadata: &SbomMetadata) -> Result<String> {
        let bom = Bom {
            schema: SCHEMA_URL,
            bom_format: "CycloneDX",
            spec_version: "1.6",
            version: 1,
            metadata: self.build_metadata(document, metadata),
            components: document.components().iter().map(build_component).collect(),
            dependencies: self.build_dependencies(document),
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }
}

impl CycloneDxFormatter {
    fn build_metadata(&self, document: &SbomDocument, metadata: &SbomMetadata) -> Metadata {
        Metadata {
            timestamp: metadata.timestamp().to_string(),
            tools: metadata
                .tools()
                .iter()
                .map(|tool| Tool {
                    vendor: tool.vendor.clone(),
                    name: tool.name.clone(),
                    version: tool.version.clone(),
                })
                .collect(),
            component: build_component(document.root()),
            properties: build_properties(metadata.properties()),
        }
    }

    fn build_dependencies(&self, document: &SbomDocument) -> Vec<Dependency> {
        document
            .dependencies()
            .iter()
            .map(|edge| Dependency {
                bom_ref: edge.reference().to_string(),
                depends_on: edge.depends_on().iter().map(ToString::to_string).collect(),
            })
            .collect()
    }
}

fn build_component(component: &SbomComponent) -> Component {
    Component {
        bom_ref: component.bom_ref().to_string(),
        component_type: component.component_type().as_str(),
        name: component.name().to_string(),
        version: component.version().to_string(),
        purl: component.purl().to_string(),
        properties: build_properties(component.properties()),
    }
}

fn build_properties(properties: &[(String, String)]) -> Vec<Property> {
    properties
        .iter()
        .map(|(name, value)| Property {
            name: name.clone(),
            value: value.clone(),
        })
        .collect()
}
