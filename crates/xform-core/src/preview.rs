//! Preview transform request
//!
//! Envelope around the config sent for a dry run. On the wire the request
//! body *is* the transform config document; there is no wrapping field.
//!
//! A request is validated before it is encoded:
//!
//! ```text
//! Constructed ──validate()──▶ Ok  ──to_document()──▶ body for transport
//!              └────────────▶ Err (every issue listed, never encoded)
//! ```

use serde_json::Value;

use crate::document::Strictness;
use crate::error::{Error, Result};
use crate::registry::ParserRegistry;
use crate::transform::{TransformConfig, ValidationMode};
use crate::validation::{ValidationError, ValidationErrorBuilder};

/// Request to preview a transform
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTransformRequest {
    config: Option<TransformConfig>,
}

impl PreviewTransformRequest {
    /// Wrap a config; `None` is accepted here and rejected by [`validate`](Self::validate)
    pub fn new(config: Option<TransformConfig>) -> Self {
        Self { config }
    }

    /// The wrapped config
    pub fn config(&self) -> Option<&TransformConfig> {
        self.config.as_ref()
    }

    /// Check that the request can be previewed
    ///
    /// Id and destination may be absent. A missing config short-circuits the
    /// remaining rules; otherwise every issue is reported together.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationErrorBuilder::new();
        match &self.config {
            Some(config) => config.collect_issues(ValidationMode::Preview, &mut errors),
            None => {
                errors.add("preview requires a non-null transform config");
            }
        }

        errors.build().inspect_err(|err| {
            tracing::debug!(issues = err.messages().len(), "preview request failed validation");
        })
    }

    /// Encode the request body
    ///
    /// Fails with [`Error::MissingConfig`] rather than writing an empty body.
    pub fn to_document(&self) -> Result<Value> {
        self.body()?.to_document()
    }

    /// Encode the request body as compact JSON text
    pub fn to_json_string(&self) -> Result<String> {
        self.body()?.to_json_string()
    }

    /// Encode the request body as indented JSON text
    pub fn to_json_string_pretty(&self) -> Result<String> {
        self.body()?.to_json_string_pretty()
    }

    fn body(&self) -> Result<&TransformConfig> {
        self.config.as_ref().ok_or(Error::MissingConfig)
    }

    /// Decode a request body
    pub fn from_document(document: &Value, strictness: Strictness) -> Result<Self> {
        TransformConfig::from_document(document, strictness).map(Self::from)
    }

    /// Decode a request body, resolving function fields through `registry`
    pub fn from_document_with(
        document: &Value,
        strictness: Strictness,
        registry: &ParserRegistry,
    ) -> Result<Self> {
        TransformConfig::from_document_with(document, strictness, registry).map(Self::from)
    }
}

impl From<TransformConfig> for PreviewTransformRequest {
    fn from(config: TransformConfig) -> Self {
        Self::new(Some(config))
    }
}
