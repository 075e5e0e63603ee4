//! Configuration and state files

use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use tideform_apps::{SENSITIVE_FIELDS, apply_defaults, validate};
use tideform_provider::{Diagnostic, ResourceData, mask_sensitive};

pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Load a resource configuration with schema defaults applied
///
/// Returns the configuration together with its validation problems.
pub fn load_config(path: &Path) -> anyhow::Result<(ResourceData, Vec<Diagnostic>)> {
    let mut config = read_json(path)?;
    let diagnostics = match config.get_mut("spec") {
        Some(spec) => {
            apply_defaults(spec);
            validate(spec)
        }
        None => vec![Diagnostic::new("spec", "required")],
    };
    let data = ResourceData::from_config(config)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    Ok((data, diagnostics))
}

/// Like [`load_config`], failing when the configuration has problems
pub fn load_valid_config(path: &Path) -> anyhow::Result<ResourceData> {
    let (data, diagnostics) = load_config(path)?;
    if diagnostics.is_empty() {
        return Ok(data);
    }
    for diagnostic in &diagnostics {
        eprintln!("  {}", diagnostic);
    }
    anyhow::bail!(
        "{} has {} validation error(s)",
        path.display(),
        diagnostics.len()
    )
}

/// State recorded by a previous run, if the file exists
pub fn load_state(path: &Path) -> anyhow::Result<Option<ResourceData>> {
    if !path.exists() {
        return Ok(None);
    }
    let value = read_json(path)?;
    let state = serde_json::from_value(value)
        .with_context(|| format!("invalid state file {}", path.display()))?;
    Ok(Some(state))
}

pub fn require_state(path: &Path) -> anyhow::Result<ResourceData> {
    load_state(path)?.with_context(|| format!("state file {} not found", path.display()))
}

pub fn save_state(path: &Path, data: &ResourceData) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(path, content + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!("Wrote state to {}", path.display());
    Ok(())
}

/// Resource data as printed to the user, secrets masked
pub fn render(data: &ResourceData) -> anyhow::Result<String> {
    let value = serde_json::to_value(data)?;
    Ok(serde_json::to_string_pretty(&mask_sensitive(
        &value,
        SENSITIVE_FIELDS,
    ))?)
}
