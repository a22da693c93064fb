use std::collections::HashMap;

/// Rule classes that produce an executable and may serve as the traversal root
pub const BINARY_CLASSES: &[&str] = &["py_binary", "java_binary"];

/// Rule classes that represent a distributable third-party library
pub const LIBRARY_CLASSES: &[&str] = &["py_library", "jvm_import", "maven_jar", "maven_import"];

/// Classification of a Bazel rule class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Binary,
    Library,
    Other,
}

impl RuleKind {
    pub fn from_class(class: &str) -> Self {
        if BINARY_CLASSES.contains(&class) {
            RuleKind::Binary
        } else if LIBRARY_CLASSES.contains(&class) {
            RuleKind::Library
        } else {
            RuleKind::Other
        }
    }
}

/// Rule entity: one `<rule>` element of a Bazel query document
///
/// Built once by the parser through the `with_*` methods and read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    class: String,
    declared_deps: Vec<String>,
    tags: Vec<String>,
    source_files: Vec<String>,
    location: Option<String>,
    program_name: Option<String>,
    generator_name: Option<String>,
    generator_function: Option<String>,
}

impl Rule {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            declared_deps: Vec::new(),
            tags: Vec::new(),
            source_files: Vec::new(),
            location: None,
            program_name: None,
            generator_name: None,
            generator_function: None,
        }
    }

    pub fn with_declared_deps(mut self, deps: Vec<String>) -> Self {
        self.declared_deps = deps;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_source_files(mut self, source_files: Vec<String>) -> Self {
        self.source_files = source_files;
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_program_name(mut self, program_name: Option<String>) -> Self {
        self.program_name = program_name;
        self
    }

    pub fn with_generator(
        mut self,
        generator_name: Option<String>,
        generator_function: Option<String>,
    ) -> Self {
        self.generator_name = generator_name;
        self.generator_function = generator_function;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn kind(&self) -> RuleKind {
        RuleKind::from_class(&self.class)
    }

    pub fn declared_deps(&self) -> &[String] {
        &self.declared_deps
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn source_files(&self) -> &[String] {
        &self.source_files
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    pub fn generator_name(&self) -> Option<&str> {
        self.generator_name.as_deref()
    }

    pub fn generator_function(&self) -> Option<&str> {
        self.generator_function.as_deref()
    }
}

/// Traversal root: the binary rule the SBOM describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTarget {
    rule_name: String,
    program_name: String,
}

impl RootTarget {
    /// Creates the root for a binary rule.
    ///
    /// The program name comes from the rule's `name` string attribute and falls
    /// back to the target part of its label (`//app:server` -> `server`).
    pub fn from_rule(rule: &Rule) -> Self {
        let program_name = rule
            .program_name()
            .filter(|name| !name.is_empty())
            .map(String::from)
            .unwrap_or_else(|| label_target_name(rule.name()).to_string());

        Self {
            rule_name: rule.name().to_string(),
            program_name,
        }
    }

    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }
}

/// Returns the target part of a Bazel label
pub fn label_target_name(label: &str) -> &str {
    if let Some((_, target)) = label.rsplit_once(':') {
        return target;
    }
    label.rsplit('/').next().unwrap_or(label)
}

/// RuleGraph aggregate: rules keyed by name, iterable in document order
///
/// Re-inserting a name replaces the earlier rule in place (last write wins)
/// while keeping its original position.
#[derive(Debug, Clone, Default)]
pub struct RuleGraph {
    rules: Vec<Rule>,
    positions: HashMap<String, usize>,
}

impl RuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule, returning the rule it replaced, if any
    pub fn insert(&mut self, rule: Rule) -> Option<Rule> {
        match self.positions.get(rule.name()) {
            Some(&position) => Some(std::mem::replace(&mut self.rules[position], rule)),
            None => {
                self.positions.insert(rule.name().to_string(), self.rules.len());
                self.rules.push(rule);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.positions.get(name).map(|&position| &self.rules[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
