//! Schema registry for defining, loading and looking up element types

use crate::definition::{ElementSchemaDefinition, ElementSchemaFile};
use crate::element::{ElementSchema, SchemaBuilder};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use xel_core::{Result, XelError};

/// Registry that holds every defined element type
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    elements: HashMap<String, Arc<ElementSchema>>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load definitions from multiple directories, in order.
    pub fn load_from_directories(paths: &[impl AsRef<Path>]) -> Result<Self> {
        let mut registry = Self::new();
        for path in paths {
            registry.load_directory(path)?;
        }
        Ok(registry)
    }

    /// Load definitions from a directory structure
    ///
    /// Expects `path/elements/*.toml`.
    pub fn load_from_directory<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut registry = Self::new();
        registry.load_directory(path)?;
        Ok(registry)
    }

    /// Load all definition files of a directory into this registry.
    ///
    /// Files are resolved together, so a type may extend or reference a type
    /// defined in a sibling file.
    pub fn load_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let elements_path = path.as_ref().join("elements");
        if !elements_path.exists() {
            tracing::debug!(path = %elements_path.display(), "no element definitions");
            return Ok(());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&elements_path)? {
            let file_path = entry?.path();
            if file_path.extension().map(|e| e == "toml").unwrap_or(false) {
                files.push(file_path);
            }
        }
        files.sort();

        let mut definitions = BTreeMap::new();
        for file_path in &files {
            let content = fs::read_to_string(file_path)?;
            let file: ElementSchemaFile = toml::from_str(&content)?;
            for (name, def) in file.element {
                if definitions.insert(name.clone(), def).is_some() {
                    return Err(XelError::DuplicateElementType(name));
                }
            }
        }

        tracing::debug!(
            path = %elements_path.display(),
            files = files.len(),
            elements = definitions.len(),
            "loading element definitions"
        );
        self.define_all(definitions)
    }

    /// Load element definitions from a TOML file
    pub fn load_element_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = fs::read_to_string(path)?;
        self.load_element_string(&content)
    }

    /// Load element definitions from a TOML string
    pub fn load_element_string(&mut self, content: &str) -> Result<()> {
        let file: ElementSchemaFile = toml::from_str(content)?;
        self.define_all(file.element.into_iter().collect())
    }

    /// Finalize a builder and register the resulting type
    pub fn define(&mut self, builder: SchemaBuilder) -> Result<Arc<ElementSchema>> {
        if self.elements.contains_key(builder.name()) {
            return Err(XelError::DuplicateElementType(builder.name().to_string()));
        }
        let schema = builder.finalize()?;
        self.register(schema.clone())?;
        Ok(schema)
    }

    /// Register an already finalized schema.
    ///
    /// Every element type referenced by an element-typed attribute must be
    /// registered already, or be the type itself.
    pub fn register(&mut self, schema: Arc<ElementSchema>) -> Result<()> {
        if self.elements.contains_key(schema.name()) {
            return Err(XelError::DuplicateElementType(schema.name().to_string()));
        }
        for reference in schema.element_references() {
            if reference != schema.name() && !self.elements.contains_key(reference) {
                return Err(XelError::UnresolvedElementType {
                    element: schema.name().to_string(),
                    reference: reference.to_string(),
                });
            }
        }

        tracing::debug!(element = schema.name(), "element type registered");
        self.elements.insert(schema.name().to_string(), schema);
        Ok(())
    }

    /// Get an element schema by name
    pub fn get(&self, name: &str) -> Option<&Arc<ElementSchema>> {
        self.elements.get(name)
    }

    /// Get an element schema by name, failing if it is not registered
    pub fn require(&self, name: &str) -> Result<Arc<ElementSchema>> {
        self.elements
            .get(name)
            .cloned()
            .ok_or_else(|| XelError::ElementTypeNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// List all element type names, sorted
    pub fn element_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.elements.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Registered types that extend `name`, directly or not
    pub fn subtypes_of(&self, name: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .elements
            .values()
            .filter(|s| s.name() != name && s.is_subtype_of(name))
            .map(|s| s.name())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Define a batch of parsed definitions in dependency order. Either all
    /// of them are registered or none.
    fn define_all(
        &mut self,
        definitions: BTreeMap<String, ElementSchemaDefinition>,
    ) -> Result<()> {
        let mut staged = self.clone();
        let mut pending = definitions;

        while !pending.is_empty() {
            let ready: Vec<String> = pending
                .iter()
                .filter(|(name, def)| {
                    def.dependencies(name.as_str())
                        .iter()
                        .all(|dep| staged.contains(dep))
                })
                .map(|(name, _)| name.clone())
                .collect();

            if ready.is_empty() {
                // Either a missing type or a cycle; report the first gap
                let Some((name, def)) = pending.iter().next() else {
                    break;
                };
                let missing = def
                    .dependencies(name)
                    .into_iter()
                    .find(|dep| !staged.contains(dep))
                    .unwrap_or_default();
                return Err(XelError::UnresolvedElementType {
                    element: name.clone(),
                    reference: missing.to_string(),
                });
            }

            for name in ready {
                if let Some(def) = pending.remove(&name) {
                    let builder = def.to_builder(&name, |n| staged.get(n).cloned())?;
                    staged.define(builder)?;
                }
            }
        }

        *self = staged;
        Ok(())
    }
}
