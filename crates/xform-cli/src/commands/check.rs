//! Check a transform configuration

use anyhow::{Context, Result};
use std::path::Path;
use xform_core::{Strictness, ValidationMode};

/// Run the check command
pub fn run(path: &Path, strictness: Strictness, stored: bool) -> Result<()> {
    tracing::info!("Checking transform: {}", path.display());

    let config = super::load_config(path, strictness)?;
    let mode = if stored {
        ValidationMode::Stored
    } else {
        ValidationMode::Preview
    };

    if let Some(id) = config.id() {
        tracing::info!("✓ Id: {}", id);
    }
    if let Some(function) = config.function() {
        tracing::info!("✓ Function: {}", function.name());
    }

    config
        .validate(mode)
        .context("Transform configuration is invalid")?;

    println!("✓ Transform configuration is valid ({:?} rules)", mode);
    Ok(())
}
