//! Destination configuration

use serde::Serialize;

use crate::document::{DocumentParser, FromDocument};
use crate::error::Result;
use crate::validation::ValidationErrorBuilder;

/// Index a stored transform writes into
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestConfig {
    /// Destination index name
    pub index: String,

    /// Ingest pipeline applied to written documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,
}

impl DestConfig {
    /// Destination without an ingest pipeline
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            pipeline: None,
        }
    }

    /// Route written documents through `pipeline`
    pub fn with_pipeline(mut self, pipeline: impl Into<String>) -> Self {
        self.pipeline = Some(pipeline.into());
        self
    }

    pub(crate) fn check(&self, errors: &mut ValidationErrorBuilder) {
        errors.add_if(
            self.index.trim().is_empty(),
            "destination index cannot be empty",
        );
    }
}

impl FromDocument for DestConfig {
    fn from_document(mut parser: DocumentParser<'_>) -> Result<Self> {
        let index = parser.required("index")?;
        let pipeline = parser.optional("pipeline")?;
        parser.finish()?;
        Ok(Self { index, pipeline })
    }
}
