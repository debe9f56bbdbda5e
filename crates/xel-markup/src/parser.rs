//! Markup parser

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct MarkupParser;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("Invalid markup: {0}")]
    Syntax(String),
    #[error("Duplicate attribute '{attribute}' on <{element}>")]
    DuplicateAttribute { element: String, attribute: String },
    #[error("Closing tag </{closing}> does not match <{opening}>")]
    MismatchedClosingTag { opening: String, closing: String },
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// A parsed element expression
#[derive(Debug, Clone, PartialEq)]
pub struct ElementExpr {
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<(String, MarkupValue)>,
}

impl ElementExpr {
    pub fn get(&self, name: &str) -> Option<&MarkupValue> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

/// Attribute values as written in markup
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Element(ElementExpr),
}

/// Parse a single element expression
pub fn parse_element(input: &str) -> Result<ElementExpr, MarkupError> {
    let pairs = MarkupParser::parse(Rule::document, input)
        .map_err(|e| MarkupError::Syntax(e.to_string()))?;

    for pair in pairs {
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::element {
                return parse_element_pair(inner);
            }
        }
    }

    Err(MarkupError::Syntax("no element found".to_string()))
}

/// Parse a standalone value, as used on the command line.
///
/// Accepts anything allowed inside `{...}` plus quoted strings. Text that is
/// none of those is taken as a plain string.
pub fn parse_value(input: &str) -> Result<MarkupValue, MarkupError> {
    let pairs = MarkupParser::parse(Rule::value_document, input)
        .map_err(|e| MarkupError::Syntax(e.to_string()))?;

    for pair in pairs {
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::expr => return parse_expr(inner),
                Rule::bare_text => {
                    return Ok(MarkupValue::String(inner.as_str().trim_end().to_string()))
                }
                _ => {}
            }
        }
    }

    Err(MarkupError::Syntax("empty value".to_string()))
}

fn parse_element_pair(pair: pest::iterators::Pair<Rule>) -> Result<ElementExpr, MarkupError> {
    let mut tag = String::new();
    let mut attributes: Vec<(String, MarkupValue)> = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::tag => {
                tag = inner.as_str().to_string();
            }
            Rule::attribute => {
                let (name, value) = parse_attribute(inner)?;
                if attributes.iter().any(|(n, _)| *n == name) {
                    return Err(MarkupError::DuplicateAttribute {
                        element: tag,
                        attribute: name,
                    });
                }
                attributes.push((name, value));
            }
            Rule::closing_tag => {
                if inner.as_str() != tag {
                    return Err(MarkupError::MismatchedClosingTag {
                        opening: tag,
                        closing: inner.as_str().to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(ElementExpr { tag, attributes })
}

fn parse_attribute(
    pair: pest::iterators::Pair<Rule>,
) -> Result<(String, MarkupValue), MarkupError> {
    let mut name = String::new();
    // A bare attribute name means true
    let mut value = MarkupValue::Bool(true);

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::attribute_name => {
                name = inner.as_str().to_string();
            }
            Rule::attribute_value => {
                for value_inner in inner.into_inner() {
                    match value_inner.as_rule() {
                        Rule::string => value = parse_string(value_inner),
                        Rule::expr => value = parse_expr(value_inner)?,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    Ok((name, value))
}

fn parse_expr(pair: pest::iterators::Pair<Rule>) -> Result<MarkupValue, MarkupError> {
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::element => return Ok(MarkupValue::Element(parse_element_pair(inner)?)),
            Rule::float => {
                let n: f64 = inner
                    .as_str()
                    .parse()
                    .map_err(|_| MarkupError::InvalidNumber(inner.as_str().to_string()))?;
                return Ok(MarkupValue::Float(n));
            }
            Rule::integer => {
                let n: i64 = inner
                    .as_str()
                    .parse()
                    .map_err(|_| MarkupError::InvalidNumber(inner.as_str().to_string()))?;
                return Ok(MarkupValue::Int(n));
            }
            Rule::boolean => return Ok(MarkupValue::Bool(inner.as_str() == "true")),
            Rule::null => return Ok(MarkupValue::Null),
            Rule::string => return Ok(parse_string(inner)),
            _ => {}
        }
    }

    Err(MarkupError::Syntax("empty expression".to_string()))
}

fn parse_string(pair: pest::iterators::Pair<Rule>) -> MarkupValue {
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::string_inner | Rule::string_inner_dq => {
                return MarkupValue::String(unescape(inner.as_str()));
            }
            _ => {}
        }
    }
    MarkupValue::String(String::new())
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '"' | '\'' | '\\') {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
