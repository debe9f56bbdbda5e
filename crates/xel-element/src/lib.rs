//! xel Element - Element instances and attribute access
//!
//! An [`ElementInstance`] is built from an element schema and a set of
//! explicit attribute values. Omitted attributes fall back to their declared
//! defaults and every value is checked against its declared type, both at
//! construction and on every write through the accessor.

#[macro_use]
mod macros;
mod element_type;
mod instance;

pub use element_type::ElementType;
pub use instance::{AttrMap, ElementInstance};
pub use xel_core::{AttrValue, ElementNode};
