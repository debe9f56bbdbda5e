//! xel Schema - Element type and attribute introspection
//!
//! This crate provides the schema system for declaring element types,
//! their typed attributes and defaults, and for validating attribute
//! values against those declarations.

mod attr_type;
mod attribute;
mod definition;
mod element;
mod registry;
mod validation;

pub use attr_type::AttrType;
pub use attribute::AttributeSchema;
pub use definition::{AttributeDefinition, ElementSchemaDefinition, ElementSchemaFile};
pub use element::{is_valid_name, ElementSchema, SchemaBuilder};
pub use registry::SchemaRegistry;
pub use validation::{conforms, validate_attribute_value, validate_default};
