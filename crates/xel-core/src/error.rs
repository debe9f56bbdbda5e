//! Error types for xel

use thiserror::Error;

/// The main error type for xel operations
#[derive(Debug, Error)]
pub enum XelError {
    #[error("Duplicate attribute '{attribute}' on <{element}>")]
    DuplicateAttribute { element: String, attribute: String },

    #[error("Invalid default for '{attribute}' on <{element}>: expected {expected}, got {got}")]
    InvalidDefault {
        element: String,
        attribute: String,
        expected: String,
        got: String,
    },

    #[error("Attribute '{attribute}' on <{element}> is required and cannot have a default")]
    RequiredWithDefault { element: String, attribute: String },

    #[error("Unsupported attribute type: {0}")]
    UnsupportedType(String),

    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    #[error("Element type <{element}> already extends <{parent}>")]
    MultipleInheritance { element: String, parent: String },

    #[error("Element type already defined: {0}")]
    DuplicateElementType(String),

    #[error("Element type <{element}> references unknown element type <{reference}>")]
    UnresolvedElementType { element: String, reference: String },

    #[error("Unknown attribute '{attribute}' on <{element}>")]
    UnknownAttribute { element: String, attribute: String },

    #[error("Type mismatch for '{attribute}' on <{element}>: expected {expected}, got {got}")]
    TypeMismatch {
        element: String,
        attribute: String,
        expected: String,
        got: String,
    },

    #[error("Expected an element of type <{expected}>, got <{got}>")]
    WrongElementType { expected: String, got: String },

    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingRequiredAttribute { element: String, attribute: String },

    #[error("Element type not found: {0}")]
    ElementTypeNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Coarse classification of [`XelError`] variants.
///
/// `Schema` errors happen while an element type is defined and are never
/// recoverable at runtime. The remaining kinds are raised while constructing
/// or accessing instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Schema,
    UnknownAttribute,
    TypeMismatch,
    MissingAttribute,
    NotFound,
    Parse,
    Io,
}

impl XelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            XelError::DuplicateAttribute { .. }
            | XelError::InvalidDefault { .. }
            | XelError::RequiredWithDefault { .. }
            | XelError::UnsupportedType(_)
            | XelError::InvalidName(_)
            | XelError::MultipleInheritance { .. }
            | XelError::DuplicateElementType(_)
            | XelError::UnresolvedElementType { .. } => ErrorKind::Schema,
            XelError::UnknownAttribute { .. } => ErrorKind::UnknownAttribute,
            XelError::TypeMismatch { .. } | XelError::WrongElementType { .. } => {
                ErrorKind::TypeMismatch
            }
            XelError::MissingRequiredAttribute { .. } => ErrorKind::MissingAttribute,
            XelError::ElementTypeNotFound(_) => ErrorKind::NotFound,
            XelError::ParseError(_) | XelError::TomlParseError(_) => ErrorKind::Parse,
            XelError::IoError(_) => ErrorKind::Io,
        }
    }

    /// True for errors raised while defining an element type
    pub fn is_schema_error(&self) -> bool {
        self.kind() == ErrorKind::Schema
    }
}

/// Result type alias for xel operations
pub type Result<T> = std::result::Result<T, XelError>;

impl From<toml::de::Error> for XelError {
    fn from(err: toml::de::Error) -> Self {
        XelError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = XelError::DuplicateAttribute {
            element: "button".to_string(),
            attribute: "label".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.is_schema_error());

        let err = XelError::UnknownAttribute {
            element: "button".to_string(),
            attribute: "colour".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::UnknownAttribute);
        assert!(!err.is_schema_error());
    }

    #[test]
    fn test_display_names_element_and_attribute() {
        let err = XelError::TypeMismatch {
            element: "my-element".to_string(),
            attribute: "a".to_string(),
            expected: "string".to_string(),
            got: "int".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch for 'a' on <my-element>: expected string, got int"
        );
    }

    #[test]
    fn test_toml_error_converts() {
        let err: XelError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
