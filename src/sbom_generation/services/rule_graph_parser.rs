use crate::sbom_generation::domain::{BuildWarning, RootTarget, Rule, RuleGraph, RuleKind};
use crate::shared::error::SbomError;
use crate::shared::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Result of parsing a Bazel query document
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub graph: RuleGraph,
    pub root: Option<RootTarget>,
    pub warnings: Vec<BuildWarning>,
}

/// RuleGraphParser service for reading `bazel query --output=xml` documents
///
/// This is a pure function from document text to rule graph. It streams the
/// document with quick-xml and keeps only the parts of each `<rule>` the SBOM
/// needs; other elements such as `<source-file>` are skipped.
pub struct RuleGraphParser;

impl RuleGraphParser {
    const ROOT_ELEMENT: &'static [u8] = b"query";

    /// Parses a query document into a rule graph and its root target
    ///
    /// # Errors
    /// Returns `SbomError::MalformedInput` if the text is not well-formed XML
    /// or the document element is not `<query>`.
    pub fn parse(xml: &str) -> Result<ParsedQuery> {
        let mut reader = Reader::from_str(xml);
        let mut state = ParserState::default();
        let mut depth = 0usize;
        let mut seen_document_element = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                malformed(format!(
                    "XML syntax error near byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(element) | Event::Empty(element)
                    if depth == 0 && seen_document_element =>
                {
                    return Err(malformed(format!(
                        "unexpected second document element <{}>",
                        element_name(&element)
                    )));
                }
                Event::Start(element) => {
                    if depth == 0 {
                        Self::check_document_element(&element)?;
                        seen_document_element = true;
                    } else {
                        state.open(&element, depth)?;
                    }
                    depth += 1;
                }
                Event::Empty(element) => {
                    if depth == 0 {
                        Self::check_document_element(&element)?;
                        seen_document_element = true;
                    } else {
                        state.open(&element, depth)?;
                        state.close(depth);
                    }
                }
                Event::End(_) => {
                    if depth == 0 {
                        return Err(malformed("closing tag without matching opening tag"));
                    }
                    depth -= 1;
                    if depth > 0 {
                        state.close(depth);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_document_element {
            return Err(malformed("document contains no elements"));
        }
        if depth != 0 {
            return Err(malformed(format!(
                "document ended with {} unclosed element(s)",
                depth
            )));
        }

        tracing::debug!(
            rules = state.graph.len(),
            root = state.root.as_ref().map(RootTarget::rule_name),
            "parsed Bazel query document"
        );

        Ok(ParsedQuery {
            graph: state.graph,
            root: state.root,
            warnings: state.warnings,
        })
    }

    fn check_document_element(element: &BytesStart) -> Result<()> {
        if element.name().as_ref() != Self::ROOT_ELEMENT {
            return Err(malformed(format!(
                "unexpected root element <{}>, expected <query>",
                element_name(element)
            )));
        }
        Ok(())
    }
}

/// Which `<list>` of the current rule is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenList {
    Deps,
    Tags,
    Srcs,
    Other,
}

#[derive(Debug, Default)]
struct PendingRule {
    class: Option<String>,
    name: Option<String>,
    location: Option<String>,
    deps: Vec<String>,
    tags: Vec<String>,
    srcs: Vec<String>,
    program_name: Option<String>,
    generator_name: Option<String>,
    generator_function: Option<String>,
}

#[derive(Debug, Default)]
struct ParserState {
    graph: RuleGraph,
    root: Option<RootTarget>,
    warnings: Vec<BuildWarning>,
    rule_count: usize,
    pending: Option<PendingRule>,
    open_list: Option<OpenList>,
}

impl ParserState {
    /// Handles an opening tag; `depth` counts the elements around it (1 = child of `<query>`)
    fn open(&mut self, element: &BytesStart, depth: usize) -> Result<()> {
        let name = element.name();
        match (depth, name.as_ref()) {
            (1, b"rule") => {
                self.rule_count += 1;
                self.pending = Some(PendingRule {
                    class: attribute(element, "class")?,
                    name: attribute(element, "name")?,
                    location: attribute(element, "location")?,
                    ..PendingRule::default()
                });
            }
            (2, b"list") if self.pending.is_some() => {
                self.open_list = Some(match attribute(element, "name")?.as_deref() {
                    Some("deps") => OpenList::Deps,
                    Some("tags") => OpenList::Tags,
                    Some("srcs") => OpenList::Srcs,
                    _ => OpenList::Other,
                });
            }
            (2, b"string") => {
                let attr_name = attribute(element, "name")?;
                let value = attribute(element, "value")?;
                if let Some(pending) = self.pending.as_mut() {
                    match attr_name.as_deref() {
                        Some("name") => pending.program_name = value,
                        Some("generator_name") => pending.generator_name = value,
                        Some("generator_function") => pending.generator_function = value,
                        _ => {}
                    }
                }
            }
            (3, b"label") | (3, b"string") => {
                let value = match attribute(element, "value")? {
                    Some(value) if !value.is_empty() => value,
                    _ => return Ok(()),
                };
                if let (Some(pending), Some(list)) = (self.pending.as_mut(), self.open_list) {
                    match (list, name.as_ref()) {
                        (OpenList::Deps, b"label") => pending.deps.push(value),
                        (OpenList::Srcs, b"label") => pending.srcs.push(value),
                        (OpenList::Tags, b"string") => pending.tags.push(value),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handles the closing of an element opened at `depth`
    fn close(&mut self, depth: usize) {
        match depth {
            1 => {
                if let Some(pending) = self.pending.take() {
                    self.finish_rule(pending);
                }
                self.open_list = None;
            }
            2 => self.open_list = None,
            _ => {}
        }
    }

    fn finish_rule(&mut self, pending: PendingRule) {
        let (class, name) = match (pending.class, pending.name) {
            (Some(class), Some(name)) if !class.is_empty() && !name.is_empty() => (class, name),
            (class, name) => {
                tracing::debug!(position = self.rule_count, "rule without identity skipped");
                self.warnings.push(BuildWarning::MissingIdentity {
                    position: self.rule_count,
                    class,
                    name,
                });
                return;
            }
        };

        let rule = Rule::new(name, class)
            .with_declared_deps(pending.deps)
            .with_tags(pending.tags)
            .with_source_files(pending.srcs)
            .with_location(pending.location)
            .with_program_name(pending.program_name)
            .with_generator(pending.generator_name, pending.generator_function);

        if rule.kind() == RuleKind::Binary && self.root.is_none() {
            let root = RootTarget::from_rule(&rule);
            tracing::debug!(
                rule = rule.name(),
                class = rule.class(),
                program = root.program_name(),
                "found main component"
            );
            self.root = Some(root);
        }

        let name = rule.name().to_string();
        if self.graph.insert(rule).is_some() {
            self.warnings.push(BuildWarning::DuplicateRule { name });
        }
    }
}

fn attribute(element: &BytesStart, key: &str) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(key)
        .map_err(|e| malformed(format!("invalid attribute on <{}>: {}", element_name(element), e)))?;

    match attr {
        Some(attr) => {
            let value = attr.unescape_value().map_err(|e| {
                malformed(format!(
                    "invalid value for attribute '{}' on <{}>: {}",
                    key,
                    element_name(element),
                    e
                ))
            })?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

fn element_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn malformed(details: impl Into<String>) -> anyhow::Error {
    SbomError::MalformedInput {
        details: details.into(),
    }
    .into()
}
