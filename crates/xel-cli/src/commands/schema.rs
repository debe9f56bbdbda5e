//! Schema introspection command

use super::load_registry;
use anyhow::Result;
use std::path::PathBuf;
use xel_schema::ElementSchema;

pub fn run(name: &str, schemas: &[PathBuf]) -> Result<()> {
    let registry = load_registry(schemas)?;

    if let Some(element) = registry.get(name) {
        print!("{}", describe(element));

        let subtypes = registry.subtypes_of(name);
        if !subtypes.is_empty() {
            println!();
            println!("Extended by: {}", subtypes.join(", "));
        }
        return Ok(());
    }

    println!("Element type '{}' not found.", name);
    let names = registry.element_names();
    if !names.is_empty() {
        println!();
        println!("Available element types:");
        for n in names {
            println!("  - {}", n);
        }
    }

    Ok(())
}

/// Human-readable summary of an element schema
pub fn describe(element: &ElementSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!("Element: <{}>\n", element.name()));
    if let Some(desc) = element.description() {
        out.push_str(&format!("Description: {}\n", desc));
    }
    if element.parent().is_some() {
        out.push_str(&format!("Lineage: {}\n", element.lineage().join(" -> ")));
    }
    out.push('\n');
    out.push_str("Attributes:\n");

    for attribute in element.attributes() {
        let flag = if attribute.required {
            " (required)"
        } else if attribute.is_nullable() {
            " (nullable)"
        } else {
            ""
        };
        out.push_str(&format!("  {} : {}{}", attribute.name, attribute.attr_type, flag));
        if let Some(default) = &attribute.default {
            out.push_str(&format!(" = {}", default));
        }
        out.push('\n');

        if let Some(desc) = &attribute.description {
            out.push_str(&format!("    # {}\n", desc));
        }
    }

    out
}
