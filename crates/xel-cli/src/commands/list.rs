//! List command

use super::load_registry;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(schemas: &[PathBuf]) -> Result<()> {
    let registry = load_registry(schemas)?;

    if registry.is_empty() {
        println!("No element types defined.");
        return Ok(());
    }

    println!("Element types:");
    for name in registry.element_names() {
        let Some(schema) = registry.get(name) else {
            continue;
        };
        let parent = schema
            .parent()
            .map(|p| format!(" extends <{}>", p.name()))
            .unwrap_or_default();
        match schema.description() {
            Some(desc) => println!("  <{}>{} - {}", name, parent, desc),
            None => println!("  <{}>{}", name, parent),
        }
    }

    Ok(())
}
