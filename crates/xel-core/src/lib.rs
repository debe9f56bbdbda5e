//! xel Core - Foundational types for the xel element model
//!
//! This crate provides the types every other xel crate depends on:
//! - `AttrValue` - A single attribute value
//! - `ElementNode` - Constructed elements as seen from attribute values
//! - Error types and Result alias

mod error;
mod value;

pub use error::{ErrorKind, Result, XelError};
pub use value::{AttrValue, ElementNode};
