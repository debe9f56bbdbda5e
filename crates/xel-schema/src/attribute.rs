//! Attribute schema definitions

use crate::attr_type::AttrType;
use xel_core::AttrValue;

/// Schema for a single attribute of an element type
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttrType,
    pub default: Option<AttrValue>,
    pub required: bool,
    pub description: Option<String>,
}

impl AttributeSchema {
    /// An attribute with no default. Unless marked [`required`](Self::required)
    /// it is nullable and starts out as `null`.
    pub fn new(name: impl Into<String>, attr_type: AttrType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            default: None,
            required: false,
            description: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<AttrValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Neither defaulted nor required
    pub fn is_nullable(&self) -> bool {
        !self.required && self.default.is_none()
    }

    /// The value an instance starts with when the attribute is omitted.
    /// `None` for required attributes.
    pub fn initial_value(&self) -> Option<AttrValue> {
        if self.required {
            None
        } else {
            Some(self.default.clone().unwrap_or(AttrValue::Null))
        }
    }
}
