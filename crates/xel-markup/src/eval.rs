//! Evaluating parsed markup against registered element types

use crate::parser::{parse_element, ElementExpr, MarkupError, MarkupValue};
use xel_core::{AttrValue, Result, XelError};
use xel_element::{AttrMap, ElementInstance};
use xel_schema::SchemaRegistry;

impl From<MarkupError> for XelError {
    fn from(err: MarkupError) -> Self {
        XelError::ParseError(err.to_string())
    }
}

/// Parse markup and construct the element it describes
pub fn construct(registry: &SchemaRegistry, input: &str) -> Result<ElementInstance> {
    let expr = parse_element(input)?;
    build_element(registry, &expr)
}

/// Construct an instance from a parsed element expression.
///
/// Undeclared names are rejected before any nested element is built. Nested
/// elements are then built innermost out, so an invalid nested element fails
/// the whole construction.
pub fn build_element(registry: &SchemaRegistry, expr: &ElementExpr) -> Result<ElementInstance> {
    let schema = registry.require(&expr.tag)?;

    if let Some((unknown, _)) = expr
        .attributes
        .iter()
        .find(|(name, _)| !schema.has_attribute(name))
    {
        return Err(XelError::UnknownAttribute {
            element: expr.tag.clone(),
            attribute: unknown.clone(),
        });
    }

    let mut values = AttrMap::new();
    for (name, value) in &expr.attributes {
        values.insert(name.clone(), to_attr_value(registry, value)?);
    }

    tracing::trace!(
        element = %expr.tag,
        attributes = values.len(),
        "building element from markup"
    );
    ElementInstance::construct(schema, values)
}

/// Convert a markup value, constructing nested elements
pub fn to_attr_value(registry: &SchemaRegistry, value: &MarkupValue) -> Result<AttrValue> {
    Ok(match value {
        MarkupValue::String(s) => AttrValue::String(s.clone()),
        MarkupValue::Int(n) => AttrValue::Int(*n),
        MarkupValue::Float(n) => AttrValue::Float(*n),
        MarkupValue::Bool(b) => AttrValue::Bool(*b),
        MarkupValue::Null => AttrValue::Null,
        MarkupValue::Element(expr) => build_element(registry, expr)?.into_value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xel_core::ErrorKind;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .load_element_string(
                r#"
[element.my-element.attributes]
a = { type = "string", default = "" }
b = { type = "string", default = "" }

[element.icon.attributes]
name = { type = "string", required = true }

[element.button.attributes]
label = { type = "string", default = "" }
count = { type = "int", default = 0 }
ratio = { type = "float", default = 1.0 }
disabled = { type = "bool", default = false }
icon = { type = "element", element = "icon" }
"#,
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_scenario_from_markup() {
        let registry = registry();

        let instance = construct(&registry, "<my-element />").unwrap();
        assert_eq!(instance.get_str("a").unwrap(), "");
        assert_eq!(instance.get_str("b").unwrap(), "");

        let instance = construct(&registry, r#"<my-element b="hi" />"#).unwrap();
        assert_eq!(instance.get_str("a").unwrap(), "");
        assert_eq!(instance.get_str("b").unwrap(), "hi");

        let err = construct(&registry, r#"<my-element c="x" />"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownAttribute);

        let err = construct(&registry, "<my-element a={5} />").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_typed_values() {
        let registry = registry();
        let instance = construct(
            &registry,
            r#"<button label="Save" count={3} ratio={0.5} disabled icon={<icon name="disk" />} />"#,
        )
        .unwrap();

        assert_eq!(instance.get_str("label").unwrap(), "Save");
        assert_eq!(instance.get_int("count").unwrap(), 3);
        assert_eq!(instance.get_float("ratio").unwrap(), 0.5);
        assert!(instance.get_bool("disabled").unwrap());
        assert_eq!(instance.get_element("icon").unwrap().element_name(), "icon");
    }

    #[test]
    fn test_no_numeric_coercion() {
        let registry = registry();
        let err = construct(&registry, "<button ratio={2} />").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_invalid_nested_element_fails() {
        let registry = registry();
        let err = construct(&registry, "<button icon={<icon />} />").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingAttribute);
    }

    #[test]
    fn test_unknown_attribute_before_nested_errors() {
        let registry = registry();

        let err = construct(&registry, "<my-element c={<icon />} />").unwrap_err();
        assert!(matches!(
            err,
            XelError::UnknownAttribute { ref attribute, .. } if attribute == "c"
        ));

        let err = construct(&registry, "<my-element c={<nope />} />").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownAttribute);

        let err = construct(&registry, "<button icon={<icon size={1} />} />").unwrap_err();
        assert!(matches!(
            err,
            XelError::UnknownAttribute { ref element, .. } if element == "icon"
        ));
    }

    #[test]
    fn test_unknown_tag() {
        let registry = registry();
        assert!(matches!(
            construct(&registry, "<nope />"),
            Err(XelError::ElementTypeNotFound(_))
        ));
    }

    #[test]
    fn test_markup_errors_are_parse_errors() {
        let registry = registry();
        let err = construct(&registry, r#"<my-element a="1" a="2" />"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
