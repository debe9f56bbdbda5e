//! Validation of attribute values against schemas

use crate::attr_type::AttrType;
use crate::attribute::AttributeSchema;
use xel_core::{AttrValue, Result, XelError};

/// Check a non-null value against a type. No coercion happens here: an
/// integer does not conform to `float` and a string only conforms to an
/// enum when it is one of the declared values.
pub fn conforms(attr_type: &AttrType, value: &AttrValue) -> bool {
    match (attr_type, value) {
        (AttrType::Mixed, _) => true,
        (AttrType::String, AttrValue::String(_)) => true,
        (AttrType::Int, AttrValue::Int(_)) => true,
        (AttrType::Float, AttrValue::Float(_)) => true,
        (AttrType::Bool, AttrValue::Bool(_)) => true,
        (AttrType::Enum { values }, AttrValue::String(s)) => values.contains(s),
        (AttrType::Element { name }, AttrValue::Element(node)) => node.is_instance_of(name),
        _ => false,
    }
}

/// Validate a value for an attribute of `element`
pub fn validate_attribute_value(
    element: &str,
    attribute: &AttributeSchema,
    value: &AttrValue,
) -> Result<()> {
    let accepted = if value.is_null() {
        attribute.is_nullable() || attribute.attr_type == AttrType::Mixed
    } else {
        conforms(&attribute.attr_type, value)
    };

    if accepted {
        Ok(())
    } else {
        Err(XelError::TypeMismatch {
            element: element.to_string(),
            attribute: attribute.name.clone(),
            expected: expected_name(attribute),
            got: got_name(&attribute.attr_type, value),
        })
    }
}

/// Validate a declared default. Null only counts as a default for `mixed`;
/// other attributes become nullable by omitting the default.
pub fn validate_default(
    element: &str,
    attribute: &AttributeSchema,
    default: &AttrValue,
) -> Result<()> {
    let accepted = if default.is_null() {
        attribute.attr_type == AttrType::Mixed
    } else {
        conforms(&attribute.attr_type, default)
    };

    if accepted {
        Ok(())
    } else {
        Err(XelError::InvalidDefault {
            element: element.to_string(),
            attribute: attribute.name.clone(),
            expected: attribute.attr_type.to_string(),
            got: got_name(&attribute.attr_type, default),
        })
    }
}

fn expected_name(attribute: &AttributeSchema) -> String {
    if attribute.is_nullable() {
        format!("?{}", attribute.attr_type)
    } else {
        attribute.attr_type.to_string()
    }
}

fn got_name(attr_type: &AttrType, value: &AttrValue) -> String {
    match (attr_type, value) {
        // Name the offending literal for enums, the type already matched
        (AttrType::Enum { .. }, AttrValue::String(s)) => format!("\"{}\"", s),
        _ => value.describe(),
    }
}
