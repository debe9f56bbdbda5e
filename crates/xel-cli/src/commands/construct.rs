//! Construct command

use super::load_registry;
use anyhow::{Context, Result};
use std::path::PathBuf;
use xel_element::ElementInstance;
use xel_schema::SchemaRegistry;

pub struct ConstructArgs {
    pub markup: String,
    pub set: Vec<String>,
    pub get: Vec<String>,
    pub format: String,
    pub schemas: Vec<PathBuf>,
}

pub fn run(args: ConstructArgs) -> Result<()> {
    let registry = load_registry(&args.schemas)?;

    let mut instance = xel_markup::construct(&registry, &args.markup)
        .with_context(|| format!("Failed to construct {}", args.markup))?;

    for assignment in &args.set {
        apply_assignment(&registry, &mut instance, assignment)?;
    }

    let output = render(&instance, &args.get, &args.format)?;
    println!("{}", output);
    Ok(())
}

/// Apply a `name=value` assignment. The value uses markup expression syntax;
/// unquoted text that is not a number, boolean or null is a string.
fn apply_assignment(
    registry: &SchemaRegistry,
    instance: &mut ElementInstance,
    assignment: &str,
) -> Result<()> {
    let Some((name, raw)) = assignment.split_once('=') else {
        anyhow::bail!("Invalid --set '{}': expected NAME=VALUE", assignment);
    };
    let name = name.trim();

    let parsed = xel_markup::parse_value(raw)?;
    let value = xel_markup::to_attr_value(registry, &parsed)?;
    tracing::debug!(attribute = name, value = %value, "setting attribute");
    instance
        .set(name, value)
        .with_context(|| format!("Failed to set '{}'", name))?;
    Ok(())
}

fn render(instance: &ElementInstance, names: &[String], format: &str) -> Result<String> {
    let mut selected = Vec::new();
    if names.is_empty() {
        selected.extend(instance.attributes().map(|(n, v)| (n.to_string(), v.clone())));
    } else {
        for name in names {
            selected.push((name.clone(), instance.get(name)?.clone()));
        }
    }

    match format {
        "text" => {
            let mut out = format!("<{}>", instance.element_name());
            for (name, value) in &selected {
                out.push_str(&format!("\n  {} = {}", name, value));
            }
            Ok(out)
        }
        "json" => {
            let attributes: serde_json::Map<String, serde_json::Value> = selected
                .iter()
                .map(|(n, v)| (n.clone(), v.to_json()))
                .collect();
            let json = serde_json::json!({
                "element": instance.element_name(),
                "attributes": attributes,
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
        other => anyhow::bail!("Unknown format '{}' (expected text or json)", other),
    }
}
