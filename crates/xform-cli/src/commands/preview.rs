//! Build a preview request body

use anyhow::{Context, Result};
use std::path::Path;
use xform_core::{PreviewTransformRequest, Strictness};

/// Run the preview command
pub fn run(path: &Path, strictness: Strictness, pretty: bool) -> Result<()> {
    let config = super::load_config(path, strictness)?;
    let request = PreviewTransformRequest::from(config);

    request
        .validate()
        .context("Preview request failed validation")?;

    let body = if pretty {
        request.to_json_string_pretty()?
    } else {
        request.to_json_string()?
    };

    tracing::debug!("Preview request body: {} bytes", body.len());
    println!("{}", body);
    Ok(())
}
