//! Attribute values

use std::fmt;
use std::sync::Arc;

/// A constructed element as seen from inside an attribute value.
///
/// Element-typed attributes hold other elements. The concrete instance type
/// lives further up the crate graph, so values only see it through this trait.
pub trait ElementNode: fmt::Debug + Send + Sync {
    /// Name of the element type this node was constructed from
    fn element_name(&self) -> &str;

    /// True if the node's type is `element` or extends it
    fn is_instance_of(&self, element: &str) -> bool;

    /// Current value of an attribute, if declared
    fn attribute(&self, name: &str) -> Option<&AttrValue>;

    /// All attribute names, in a stable order
    fn attribute_names(&self) -> Vec<&str>;
}

/// A single attribute value
#[derive(Debug, Clone, Default)]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Element(Arc<dyn ElementNode>),
}

impl AttrValue {
    /// Short name of the value's runtime type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Null => "null",
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::String(_) => "string",
            AttrValue::Element(_) => "element",
        }
    }

    /// Type name with the element name attached for element values
    pub fn describe(&self) -> String {
        match self {
            AttrValue::Element(node) => format!("element<{}>", node.element_name()),
            other => other.type_name().to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Arc<dyn ElementNode>> {
        match self {
            AttrValue::Element(node) => Some(node),
            _ => None,
        }
    }

    /// Convert a TOML scalar. Arrays, tables and datetimes have no attribute
    /// representation and yield `None`.
    pub fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::String(s) => Some(AttrValue::String(s.clone())),
            toml::Value::Integer(n) => Some(AttrValue::Int(*n)),
            toml::Value::Float(n) => Some(AttrValue::Float(*n)),
            toml::Value::Boolean(b) => Some(AttrValue::Bool(*b)),
            toml::Value::Datetime(_) | toml::Value::Array(_) | toml::Value::Table(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttrValue::Null => serde_json::Value::Null,
            AttrValue::Bool(b) => serde_json::Value::Bool(*b),
            AttrValue::Int(n) => serde_json::Value::from(*n),
            AttrValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            AttrValue::String(s) => serde_json::Value::String(s.clone()),
            AttrValue::Element(node) => {
                let mut attributes = serde_json::Map::new();
                for name in node.attribute_names() {
                    if let Some(value) = node.attribute(name) {
                        attributes.insert(name.to_string(), value.to_json());
                    }
                }
                serde_json::json!({
                    "element": node.element_name(),
                    "attributes": attributes,
                })
            }
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrValue::Null, AttrValue::Null) => true,
            (AttrValue::Bool(a), AttrValue::Bool(b)) => a == b,
            (AttrValue::Int(a), AttrValue::Int(b)) => a == b,
            (AttrValue::Float(a), AttrValue::Float(b)) => a == b,
            (AttrValue::String(a), AttrValue::String(b)) => a == b,
            // Elements compare by identity
            (AttrValue::Element(a), AttrValue::Element(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

/// Quote a string the way markup reads it back: single quotes when that
/// avoids escaping, otherwise double quotes with `\` and `"` escaped.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if s.contains('"') && !s.contains('\'') && !s.contains('\\') {
        return write!(f, "'{}'", s);
    }
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' | '\\' => write!(f, "\\{}", c)?,
            _ => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => write!(f, "null"),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Int(n) => write!(f, "{}", n),
            AttrValue::Float(n) => write!(f, "{:?}", n),
            AttrValue::String(s) => write_quoted(f, s),
            AttrValue::Element(node) => {
                write!(f, "<{}", node.element_name())?;
                for name in node.attribute_names() {
                    match node.attribute(name) {
                        None | Some(AttrValue::Null) => {}
                        Some(AttrValue::String(s)) => {
                            write!(f, " {}=", name)?;
                            write_quoted(f, s)?;
                        }
                        Some(value) => write!(f, " {}={{{}}}", name, value)?,
                    }
                }
                write!(f, " />")
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::String(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::String(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Int(n)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Int(n as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Float(n)
    }
}

impl From<Arc<dyn ElementNode>> for AttrValue {
    fn from(node: Arc<dyn ElementNode>) -> Self {
        AttrValue::Element(node)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttrValue::Null)
    }
}
