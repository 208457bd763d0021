//! Source configuration
//!
//! Describes the indices a transform reads from and the query that filters
//! them. The query and runtime mappings are opaque to this crate; they are
//! carried through the codec untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{DocumentParser, FromDocument};
use crate::error::Result;
use crate::validation::ValidationErrorBuilder;

/// Input side of a transform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceConfig {
    /// Index names or patterns to read from
    pub index: Vec<String>,

    /// Query restricting the source documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,

    /// Search-time runtime field definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_mappings: Option<Map<String, Value>>,
}

/// `index` accepts a single name as well as a list
#[derive(Deserialize)]
#[serde(untagged)]
enum IndexNames {
    One(String),
    Many(Vec<String>),
}

impl From<IndexNames> for Vec<String> {
    fn from(names: IndexNames) -> Self {
        match names {
            IndexNames::One(name) => vec![name],
            IndexNames::Many(names) => names,
        }
    }
}

impl SourceConfig {
    /// Source reading every document of the given indices
    pub fn new<I, S>(index: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index: index.into_iter().map(Into::into).collect(),
            query: None,
            runtime_mappings: None,
        }
    }

    /// Restrict the source with a query
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Attach runtime mappings
    pub fn with_runtime_mappings(mut self, mappings: Map<String, Value>) -> Self {
        self.runtime_mappings = Some(mappings);
        self
    }

    pub(crate) fn check(&self, errors: &mut ValidationErrorBuilder) {
        errors.add_if(self.index.is_empty(), "source index cannot be empty");
        errors.add_if(
            self.index.iter().any(|name| name.trim().is_empty()),
            "source index names cannot be empty",
        );
    }
}

impl FromDocument for SourceConfig {
    fn from_document(mut parser: DocumentParser<'_>) -> Result<Self> {
        let index: IndexNames = parser.required("index")?;
        let query = parser.optional("query")?;
        let runtime_mappings = parser.optional("runtime_mappings")?;
        parser.finish()?;

        Ok(Self {
            index: index.into(),
            query,
            runtime_mappings,
        })
    }
}
