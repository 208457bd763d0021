//! CLI command implementations

pub mod check;
pub mod preview;

use anyhow::{Context, Result};
use std::path::Path;
use xform_core::{Strictness, TransformConfig};

/// Map the `--lenient` flag to a decode policy
pub fn strictness(lenient: bool) -> Strictness {
    if lenient {
        Strictness::Lenient
    } else {
        Strictness::Strict
    }
}

/// Read and decode a transform document, choosing YAML or JSON by extension
pub fn load_config(path: &Path, strictness: Strictness) -> Result<TransformConfig> {
    tracing::debug!("Reading transform document: {}", path.display());

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");

    let config = if is_yaml {
        TransformConfig::from_yaml_str(&contents, strictness)
    } else {
        TransformConfig::from_json_str(&contents, strictness)
    };

    config.with_context(|| format!("Failed to decode transform document {}", path.display()))
}
