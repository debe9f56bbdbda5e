//! xel Markup - Declarative element construction
//!
//! Parses XML-like element expressions such as
//! `<button label="Save" count={3} />` and builds validated element
//! instances from them.

mod eval;
mod parser;

pub use eval::{build_element, construct, to_attr_value};
pub use parser::{parse_element, parse_value, ElementExpr, MarkupError, MarkupValue};
