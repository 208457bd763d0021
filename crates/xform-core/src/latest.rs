//! Latest function: keep the most recent document per unique key

use serde::Serialize;

use crate::document::{DocumentParser, FromDocument};
use crate::error::Result;
use crate::validation::ValidationErrorBuilder;

/// Most-recent-document function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestConfig {
    /// Fields whose combined values identify a group
    pub unique_key: Vec<String>,

    /// Field ordering documents within a group; the highest value wins
    pub sort: String,
}

impl LatestConfig {
    /// Keep the document with the highest `sort` per `unique_key`
    pub fn new<I, S>(unique_key: I, sort: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            unique_key: unique_key.into_iter().map(Into::into).collect(),
            sort: sort.into(),
        }
    }

    pub(crate) fn check(&self, errors: &mut ValidationErrorBuilder) {
        errors
            .add_if(self.unique_key.is_empty(), "latest unique_key cannot be empty")
            .add_if(
                self.unique_key.iter().any(|key| key.trim().is_empty()),
                "latest unique_key elements cannot be empty",
            )
            .add_if(self.sort.trim().is_empty(), "latest sort cannot be empty");
    }
}

impl FromDocument for LatestConfig {
    fn from_document(mut parser: DocumentParser<'_>) -> Result<Self> {
        let unique_key = parser.required("unique_key")?;
        let sort = parser.required("sort")?;
        parser.finish()?;
        Ok(Self { unique_key, sort })
    }
}
