//! TOML file format for element definitions

use crate::attr_type::AttrType;
use crate::attribute::AttributeSchema;
use crate::element::{ElementSchema, SchemaBuilder};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use xel_core::{AttrValue, Result, XelError};

/// TOML file format for element schemas
#[derive(Debug, Deserialize)]
pub struct ElementSchemaFile {
    #[serde(default)]
    pub element: HashMap<String, ElementSchemaDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct ElementSchemaDefinition {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub inherit: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeDefinition>,
}

/// Attribute definition as it appears in TOML files
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttributeDefinition {
    Simple(String),
    Detailed(DetailedAttributeDefinition),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailedAttributeDefinition {
    #[serde(rename = "type")]
    pub attr_type: String,
    #[serde(default)]
    pub values: Option<Vec<String>>,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub default: Option<toml::Value>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl AttributeDefinition {
    /// Element type named by an `element` attribute
    pub fn element_reference(&self) -> Option<&str> {
        match self {
            AttributeDefinition::Detailed(d) if d.attr_type == "element" => d.element.as_deref(),
            _ => None,
        }
    }

    pub fn to_attribute_schema(self, element: &str, name: &str) -> Result<AttributeSchema> {
        match self {
            AttributeDefinition::Simple(type_str) => Ok(AttributeSchema::new(
                name,
                AttrType::parse(&type_str, None, None)?,
            )),
            AttributeDefinition::Detailed(d) => {
                let attr_type =
                    AttrType::parse(&d.attr_type, d.values.as_deref(), d.element.as_deref())?;
                let mut attribute = AttributeSchema::new(name, attr_type);
                if let Some(default) = &d.default {
                    let value = AttrValue::from_toml(default).ok_or_else(|| {
                        XelError::InvalidDefault {
                            element: element.to_string(),
                            attribute: name.to_string(),
                            expected: attribute.attr_type.to_string(),
                            got: default.type_str().to_string(),
                        }
                    })?;
                    attribute.default = Some(value);
                }
                attribute.required = d.required.unwrap_or(false);
                attribute.description = d.description;
                Ok(attribute)
            }
        }
    }
}

impl ElementSchemaDefinition {
    /// Other element types that must be registered before this one
    pub fn dependencies<'a>(&'a self, own_name: &str) -> Vec<&'a str> {
        let mut deps: Vec<&str> = self
            .extends
            .iter()
            .chain(self.inherit.iter())
            .map(|s| s.as_str())
            .chain(self.attributes.values().filter_map(|a| a.element_reference()))
            .filter(|dep| *dep != own_name)
            .collect();
        deps.sort_unstable();
        deps.dedup();
        deps
    }

    /// Build the schema. `lookup` resolves already registered element types.
    pub fn to_builder(
        self,
        name: &str,
        lookup: impl Fn(&str) -> Option<Arc<ElementSchema>>,
    ) -> Result<SchemaBuilder> {
        let resolve = |reference: &str| {
            lookup(reference).ok_or_else(|| XelError::UnresolvedElementType {
                element: name.to_string(),
                reference: reference.to_string(),
            })
        };

        let mut builder = SchemaBuilder::new(name);
        if let Some(description) = self.description {
            builder.description(description);
        }
        if let Some(parent) = &self.extends {
            builder.extends(resolve(parent)?)?;
        }
        for other in &self.inherit {
            let other = resolve(other)?;
            builder.inherit_attributes(&other)?;
        }
        for (attr_name, def) in self.attributes {
            builder.declare(def.to_attribute_schema(name, &attr_name)?)?;
        }
        Ok(builder)
    }
}
