//! Element type schemas and the builder that produces them

use crate::attr_type::AttrType;
use crate::attribute::AttributeSchema;
use crate::validation::validate_default;
use std::collections::BTreeMap;
use std::sync::Arc;
use xel_core::{AttrValue, Result, XelError};

/// Frozen schema of an element type.
///
/// Only obtainable through [`SchemaBuilder::finalize`], which hands it out as
/// an `Arc` shared by every instance of the type. Nothing can be declared on
/// it afterwards.
#[derive(Debug)]
pub struct ElementSchema {
    name: String,
    description: Option<String>,
    parent: Option<Arc<ElementSchema>>,
    /// Own and inherited attributes
    attributes: BTreeMap<String, AttributeSchema>,
}

impl ElementSchema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The element type this one extends, if any
    pub fn parent(&self) -> Option<&Arc<ElementSchema>> {
        self.parent.as_ref()
    }

    /// Get an attribute schema by name
    pub fn get_attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// All attributes, ordered by name
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeSchema> {
        self.attributes.values()
    }

    /// List all attribute names
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(|s| s.as_str()).collect()
    }

    pub fn required_attributes(&self) -> Vec<&str> {
        self.attributes
            .values()
            .filter(|a| a.required)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// This type followed by its ancestors, nearest first
    pub fn lineage(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        let mut current = self.parent.as_deref();
        while let Some(schema) = current {
            names.push(schema.name.as_str());
            current = schema.parent.as_deref();
        }
        names
    }

    /// True if this type is `element` or extends it
    pub fn is_subtype_of(&self, element: &str) -> bool {
        self.lineage().contains(&element)
    }

    /// Element types named by element-typed attributes
    pub fn element_references(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .attributes
            .values()
            .filter_map(|a| match &a.attr_type {
                AttrType::Element { name } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Collects attribute declarations for one element type.
///
/// Every declaration is checked immediately, so a bad schema fails where it
/// is written rather than when the first instance is built.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    description: Option<String>,
    parent: Option<Arc<ElementSchema>>,
    attributes: BTreeMap<String, AttributeSchema>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Make this type a subtype of `parent`, inheriting all its attributes
    pub fn extends(&mut self, parent: Arc<ElementSchema>) -> Result<&mut Self> {
        if let Some(existing) = &self.parent {
            return Err(XelError::MultipleInheritance {
                element: self.name.clone(),
                parent: existing.name.clone(),
            });
        }
        self.copy_attributes(&parent)?;
        self.parent = Some(parent);
        Ok(self)
    }

    /// Copy the attributes of `other` without becoming its subtype
    pub fn inherit_attributes(&mut self, other: &ElementSchema) -> Result<&mut Self> {
        self.copy_attributes(other)?;
        Ok(self)
    }

    /// Declare an attribute with a default value
    pub fn declare_attribute(
        &mut self,
        name: impl Into<String>,
        attr_type: AttrType,
        default: impl Into<AttrValue>,
    ) -> Result<&mut Self> {
        self.declare(AttributeSchema::new(name, attr_type).with_default(default))
    }

    /// Declare a fully specified attribute
    pub fn declare(&mut self, attribute: AttributeSchema) -> Result<&mut Self> {
        validate_name(&attribute.name)?;
        attribute.attr_type.check()?;
        if let AttrType::Element { name } = &attribute.attr_type {
            validate_name(name)?;
        }

        if self.attributes.contains_key(&attribute.name) {
            return Err(XelError::DuplicateAttribute {
                element: self.name.clone(),
                attribute: attribute.name,
            });
        }

        if let Some(default) = &attribute.default {
            if attribute.required {
                return Err(XelError::RequiredWithDefault {
                    element: self.name.clone(),
                    attribute: attribute.name,
                });
            }
            validate_default(&self.name, &attribute, default)?;
        }

        self.attributes.insert(attribute.name.clone(), attribute);
        Ok(self)
    }

    /// Freeze the schema
    pub fn finalize(self) -> Result<Arc<ElementSchema>> {
        validate_name(&self.name)?;

        tracing::debug!(
            element = %self.name,
            attributes = self.attributes.len(),
            parent = self.parent.as_ref().map(|p| p.name()),
            "element schema finalized"
        );

        Ok(Arc::new(ElementSchema {
            name: self.name,
            description: self.description,
            parent: self.parent,
            attributes: self.attributes,
        }))
    }

    fn copy_attributes(&mut self, from: &ElementSchema) -> Result<()> {
        let clash = from
            .attribute_names()
            .into_iter()
            .find(|n| self.attributes.contains_key(*n));
        if let Some(clash) = clash {
            return Err(XelError::DuplicateAttribute {
                element: self.name.clone(),
                attribute: clash.to_string(),
            });
        }
        for attribute in from.attributes() {
            self.attributes.insert(attribute.name.clone(), attribute.clone());
        }
        Ok(())
    }
}

/// Element and attribute names: a letter or `_`, then letters, digits,
/// `_`, `-`, `:` or `.`
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))
}

fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(XelError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Arc<ElementSchema> {
        let mut builder = ElementSchema::builder("widget");
        builder
            .declare_attribute("id", AttrType::String, "")
            .unwrap()
            .declare_attribute("hidden", AttrType::Bool, false)
            .unwrap();
        builder.finalize().unwrap()
    }

    #[test]
    fn test_declare_and_finalize() {
        let mut builder = ElementSchema::builder("my-element");
        builder.description("Two strings");
        builder.declare_attribute("a", AttrType::String, "").unwrap();
        builder.declare_attribute("b", AttrType::String, "").unwrap();
        let schema = builder.finalize().unwrap();

        assert_eq!(schema.name(), "my-element");
        assert_eq!(schema.description(), Some("Two strings"));
        assert_eq!(schema.attribute_names(), vec!["a", "b"]);
        assert_eq!(
            schema.get_attribute("a").unwrap().default,
            Some(AttrValue::from(""))
        );
    }

    #[test]
    fn test_duplicate_attribute() {
        let mut builder = ElementSchema::builder("my-element");
        builder.declare_attribute("a", AttrType::String, "").unwrap();
        let err = builder.declare_attribute("a", AttrType::Int, 0).unwrap_err();
        assert!(matches!(err, XelError::DuplicateAttribute { .. }));
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_default_type_mismatch() {
        let mut builder = ElementSchema::builder("my-element");
        assert!(matches!(
            builder.declare_attribute("a", AttrType::String, 5),
            Err(XelError::InvalidDefault { .. })
        ));
        assert!(matches!(
            builder.declare_attribute("size", AttrType::enumeration(["s", "m"]), "xl"),
            Err(XelError::InvalidDefault { .. })
        ));
    }

    #[test]
    fn test_required_with_default_rejected() {
        let mut builder = ElementSchema::builder("counter");
        let attribute = AttributeSchema::new("count", AttrType::Int).with_default(1).required();
        assert!(matches!(
            builder.declare(attribute),
            Err(XelError::RequiredWithDefault { .. })
        ));
    }

    #[test]
    fn test_unsupported_types_fail_at_declaration() {
        let mut builder = ElementSchema::builder("select");
        let empty_enum = AttributeSchema::new("choice", AttrType::Enum { values: vec![] });
        assert!(matches!(
            builder.declare(empty_enum),
            Err(XelError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_invalid_names() {
        let mut builder = ElementSchema::builder("my-element");
        assert!(matches!(
            builder.declare_attribute("1st", AttrType::String, ""),
            Err(XelError::InvalidName(_))
        ));
        assert!(matches!(
            ElementSchema::builder("").finalize(),
            Err(XelError::InvalidName(_))
        ));
        assert!(is_valid_name("ui:button"));
        assert!(is_valid_name("data-id"));
    }

    #[test]
    fn test_extends_inherits_attributes_and_lineage() {
        let widget = widget();
        let mut builder = ElementSchema::builder("button");
        builder
            .extends(widget.clone())
            .unwrap()
            .declare_attribute("label", AttrType::String, "")
            .unwrap();
        let button = builder.finalize().unwrap();

        assert_eq!(button.attribute_names(), vec!["hidden", "id", "label"]);
        assert_eq!(button.lineage(), vec!["button", "widget"]);
        assert!(button.is_subtype_of("widget"));
        assert!(!widget.is_subtype_of("button"));
    }

    #[test]
    fn test_redeclaring_inherited_attribute_fails() {
        let mut builder = ElementSchema::builder("button");
        builder.extends(widget()).unwrap();
        assert!(matches!(
            builder.declare_attribute("id", AttrType::String, "x"),
            Err(XelError::DuplicateAttribute { .. })
        ));
    }

    #[test]
    fn test_single_parent_only() {
        let mut builder = ElementSchema::builder("button");
        builder.extends(widget()).unwrap();
        assert!(matches!(
            builder.extends(widget()),
            Err(XelError::MultipleInheritance { .. })
        ));
    }

    #[test]
    fn test_inherit_attributes_is_not_subtyping() {
        let widget = widget();
        let mut builder = ElementSchema::builder("link");
        builder.inherit_attributes(&widget).unwrap();
        let link = builder.finalize().unwrap();

        assert!(link.has_attribute("id"));
        assert!(link.parent().is_none());
        assert!(!link.is_subtype_of("widget"));
    }

    #[test]
    fn test_element_references() {
        let mut builder = ElementSchema::builder("button");
        builder
            .declare(AttributeSchema::new("icon", AttrType::element("icon")))
            .unwrap()
            .declare(AttributeSchema::new("badge", AttrType::element("icon")))
            .unwrap();
        let button = builder.finalize().unwrap();
        assert_eq!(button.element_references(), vec!["icon"]);
    }

    #[test]
    fn test_schema_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Arc<ElementSchema>>();
    }
}
