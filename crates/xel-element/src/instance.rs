//! Element instances and the attribute accessor

use std::collections::BTreeMap;
use std::sync::Arc;
use xel_core::{AttrValue, ElementNode, Result, XelError};
use xel_schema::{validate_attribute_value, AttributeSchema, ElementSchema};

/// Explicit attribute values supplied at construction, keyed by name
pub type AttrMap = BTreeMap<String, AttrValue>;

/// A constructed element.
///
/// Holds exactly one value per attribute of its schema. Values are only
/// replaced through [`set`](Self::set), which checks them against the
/// schema, so an instance never holds an undeclared or ill-typed attribute.
#[derive(Debug, Clone)]
pub struct ElementInstance {
    schema: Arc<ElementSchema>,
    attributes: BTreeMap<String, AttrValue>,
}

impl ElementInstance {
    /// Build an instance from explicit values, filling the rest with defaults.
    ///
    /// Unknown names are reported before type mismatches, and type mismatches
    /// before missing required attributes.
    pub fn construct(schema: Arc<ElementSchema>, explicit: AttrMap) -> Result<Self> {
        if let Some(unknown) = explicit.keys().find(|name| !schema.has_attribute(name)) {
            return Err(XelError::UnknownAttribute {
                element: schema.name().to_string(),
                attribute: unknown.clone(),
            });
        }

        for (name, value) in &explicit {
            let attribute = lookup(&schema, name)?;
            validate_attribute_value(schema.name(), attribute, value)?;
        }

        let mut attributes = explicit;
        for attribute in schema.attributes() {
            if attributes.contains_key(&attribute.name) {
                continue;
            }
            let value = attribute.initial_value().ok_or_else(|| {
                XelError::MissingRequiredAttribute {
                    element: schema.name().to_string(),
                    attribute: attribute.name.clone(),
                }
            })?;
            attributes.insert(attribute.name.clone(), value);
        }

        tracing::trace!(element = schema.name(), "element constructed");
        Ok(Self { schema, attributes })
    }

    /// Build an instance with every attribute at its default
    pub fn with_defaults(schema: Arc<ElementSchema>) -> Result<Self> {
        Self::construct(schema, AttrMap::new())
    }

    pub fn schema(&self) -> &Arc<ElementSchema> {
        &self.schema
    }

    pub fn element_name(&self) -> &str {
        self.schema.name()
    }

    /// Current value of an attribute
    pub fn get(&self, name: &str) -> Result<&AttrValue> {
        self.attributes.get(name).ok_or_else(|| XelError::UnknownAttribute {
            element: self.schema.name().to_string(),
            attribute: name.to_string(),
        })
    }

    /// Replace the value of an attribute. The old value is kept if the new
    /// one is rejected.
    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<()> {
        let value = value.into();
        let attribute = lookup(&self.schema, name)?;
        validate_attribute_value(self.schema.name(), attribute, &value)?;
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get_str(&self, name: &str) -> Result<&str> {
        self.typed(name, "string", AttrValue::as_str)
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        self.typed(name, "int", AttrValue::as_int)
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        self.typed(name, "float", AttrValue::as_float)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.typed(name, "bool", AttrValue::as_bool)
    }

    pub fn get_element(&self, name: &str) -> Result<&Arc<dyn ElementNode>> {
        self.typed(name, "element", AttrValue::as_element)
    }

    /// All attributes with their current values, ordered by name
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Wrap this instance as a value for an element-typed attribute
    pub fn into_value(self) -> AttrValue {
        AttrValue::Element(Arc::new(self))
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &str,
        extract: impl FnOnce(&'a AttrValue) -> Option<T>,
    ) -> Result<T> {
        let value = self.get(name)?;
        extract(value).ok_or_else(|| XelError::TypeMismatch {
            element: self.schema.name().to_string(),
            attribute: name.to_string(),
            expected: expected.to_string(),
            got: value.describe(),
        })
    }
}

fn lookup<'a>(schema: &'a ElementSchema, name: &str) -> Result<&'a AttributeSchema> {
    schema
        .get_attribute(name)
        .ok_or_else(|| XelError::UnknownAttribute {
            element: schema.name().to_string(),
            attribute: name.to_string(),
        })
}

impl ElementNode for ElementInstance {
    fn element_name(&self) -> &str {
        self.schema.name()
    }

    fn is_instance_of(&self, element: &str) -> bool {
        self.schema.is_subtype_of(element)
    }

    fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(|s| s.as_str()).collect()
    }
}
