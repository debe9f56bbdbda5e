//! CLI command implementations

pub mod construct;
pub mod demo;
pub mod list;
pub mod schema;

use anyhow::{Context, Result};
use std::path::PathBuf;
use xel_schema::SchemaRegistry;

/// Load element definitions from every existing schemas directory.
/// Fails if none of them exist.
pub fn load_registry(paths: &[PathBuf]) -> Result<SchemaRegistry> {
    let existing: Vec<&PathBuf> = paths.iter().filter(|p| p.exists()).collect();
    for missing in paths.iter().filter(|p| !p.exists()) {
        tracing::warn!(path = %missing.display(), "schemas directory not found");
    }
    if existing.is_empty() {
        let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        anyhow::bail!("Schemas directory not found: {}", listed.join(", "));
    }

    let registry = SchemaRegistry::load_from_directories(&existing)
        .context("Failed to load element definitions")?;
    tracing::info!(elements = registry.len(), "element definitions loaded");
    Ok(registry)
}
