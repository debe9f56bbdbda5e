//! Attribute value types

use serde::{Deserialize, Serialize};
use std::fmt;
use xel_core::{Result, XelError};

/// The type of an attribute in an element schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    String,
    Int,
    Float,
    Bool,
    #[serde(rename = "enum")]
    Enum { values: Vec<String> },
    Element { name: String },
    /// Accepts any value, including null
    Mixed,
}

impl AttrType {
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttrType::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn element(name: impl Into<String>) -> Self {
        AttrType::Element { name: name.into() }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AttrType::String => "string",
            AttrType::Int => "int",
            AttrType::Float => "float",
            AttrType::Bool => "bool",
            AttrType::Enum { .. } => "enum",
            AttrType::Element { .. } => "element",
            AttrType::Mixed => "mixed",
        }
    }

    /// Parse a type name as it appears in definition files.
    ///
    /// `enum` needs a non-empty value list and `element` needs the referenced
    /// element type name.
    pub fn parse(
        type_str: &str,
        enum_values: Option<&[String]>,
        element: Option<&str>,
    ) -> Result<Self> {
        let attr_type = match type_str {
            "string" => AttrType::String,
            "int" | "integer" => AttrType::Int,
            "float" => AttrType::Float,
            "bool" | "boolean" => AttrType::Bool,
            "mixed" => AttrType::Mixed,
            "enum" => AttrType::Enum {
                values: enum_values.map(<[String]>::to_vec).unwrap_or_default(),
            },
            "element" => match element {
                Some(name) => AttrType::element(name),
                None => {
                    return Err(XelError::UnsupportedType(
                        "element type without an element name".to_string(),
                    ))
                }
            },
            other => return Err(XelError::UnsupportedType(other.to_string())),
        };
        attr_type.check()?;
        Ok(attr_type)
    }

    /// Reject types that can never hold a value
    pub fn check(&self) -> Result<()> {
        match self {
            AttrType::Enum { values } if values.is_empty() => Err(XelError::UnsupportedType(
                "enum without values".to_string(),
            )),
            AttrType::Element { name } if name.is_empty() => Err(XelError::UnsupportedType(
                "element type without an element name".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrType::Enum { values } => write!(f, "enum[{}]", values.join(", ")),
            AttrType::Element { name } => write!(f, "element<{}>", name),
            other => write!(f, "{}", other.type_name()),
        }
    }
}
