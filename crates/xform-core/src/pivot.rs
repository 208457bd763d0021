//! Pivot function
//!
//! A pivot groups source documents by one or more group sources and computes
//! aggregations per bucket. Aggregation bodies are opaque to this crate.
//!
//! ```json
//! {
//!   "group_by": {
//!     "customer": { "terms": { "field": "customer_id" } },
//!     "day": { "date_histogram": { "field": "ts", "calendar_interval": "1d" } }
//!   },
//!   "aggregations": {
//!     "spend": { "sum": { "field": "total" } }
//!   }
//! }
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::document::{DocumentParser, FromDocument};
use crate::error::{Error, Result};
use crate::validation::ValidationErrorBuilder;

/// Grouping/aggregation function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotConfig {
    /// Named group sources forming the bucket key
    pub group_by: BTreeMap<String, GroupSource>,

    /// Named aggregations computed per bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Map<String, Value>>,
}

/// One dimension of a pivot's bucket key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSource {
    /// Bucket by distinct field values
    Terms(TermsGroupSource),
    /// Bucket numeric values into fixed-width intervals
    Histogram(HistogramGroupSource),
    /// Bucket timestamps into calendar or fixed intervals
    DateHistogram(DateHistogramGroupSource),
}

/// Terms group source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermsGroupSource {
    /// Field to group on
    pub field: String,

    /// Emit a bucket for documents without the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_bucket: Option<bool>,
}

/// Histogram group source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramGroupSource {
    /// Numeric field to group on
    pub field: String,

    /// Bucket width
    pub interval: f64,

    /// Emit a bucket for documents without the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_bucket: Option<bool>,
}

/// Date histogram group source
///
/// Exactly one of `calendar_interval` and `fixed_interval` must be set; this
/// is checked by validation, not by decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateHistogramGroupSource {
    /// Date field to group on
    pub field: String,

    /// Calendar-aware interval such as `1M`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_interval: Option<String>,

    /// Fixed-length interval such as `90m`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_interval: Option<String>,

    /// Time zone used to compute bucket boundaries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    /// Emit a bucket for documents without the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_bucket: Option<bool>,
}

impl PivotConfig {
    /// Pivot over `group_by` without aggregations
    pub fn new(group_by: BTreeMap<String, GroupSource>) -> Self {
        Self {
            group_by,
            aggregations: None,
        }
    }

    /// Attach aggregations
    pub fn with_aggregations(mut self, aggregations: Map<String, Value>) -> Self {
        self.aggregations = Some(aggregations);
        self
    }

    pub(crate) fn check(&self, errors: &mut ValidationErrorBuilder) {
        errors.add_if(self.group_by.is_empty(), "pivot group_by cannot be empty");
        for (name, source) in &self.group_by {
            if let GroupSource::DateHistogram(histogram) = source {
                errors.add_if(
                    histogram.calendar_interval.is_some() == histogram.fixed_interval.is_some(),
                    format!(
                        "date_histogram group [{}] requires exactly one of [calendar_interval, fixed_interval]",
                        name
                    ),
                );
            }
        }
    }
}

impl GroupSource {
    /// Terms grouping on `field`
    pub fn terms(field: impl Into<String>) -> Self {
        Self::Terms(TermsGroupSource {
            field: field.into(),
            missing_bucket: None,
        })
    }

    /// Wire name of this group source type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Terms(_) => "terms",
            Self::Histogram(_) => "histogram",
            Self::DateHistogram(_) => "date_histogram",
        }
    }
}

impl FromDocument for PivotConfig {
    fn from_document(mut parser: DocumentParser<'_>) -> Result<Self> {
        let group_by = parser.required_map("group_by")?;
        // `aggs` is accepted as a shorthand; if both are given the alias is left unconsumed
        let aggregations = match parser.optional("aggregations")? {
            Some(aggregations) => Some(aggregations),
            None => parser.optional("aggs")?,
        };
        parser.finish()?;

        Ok(Self {
            group_by,
            aggregations,
        })
    }
}

impl FromDocument for GroupSource {
    fn from_document(mut parser: DocumentParser<'_>) -> Result<Self> {
        let kinds = parser.remaining();
        let &[kind] = kinds.as_slice() else {
            return Err(Error::InvalidField {
                path: parser.path().to_string(),
                message: format!(
                    "group source must define exactly one of [terms, histogram, date_histogram], found {}",
                    kinds.len()
                ),
            });
        };

        let source = match kind {
            "terms" => parser.object_with(kind, |mut terms| {
                let source = TermsGroupSource {
                    field: terms.required("field")?,
                    missing_bucket: terms.optional("missing_bucket")?,
                };
                terms.finish()?;
                Ok(GroupSource::Terms(source))
            })?,
            "histogram" => parser.object_with(kind, |mut histogram| {
                let source = HistogramGroupSource {
                    field: histogram.required("field")?,
                    interval: histogram.required("interval")?,
                    missing_bucket: histogram.optional("missing_bucket")?,
                };
                histogram.finish()?;
                Ok(GroupSource::Histogram(source))
            })?,
            "date_histogram" => parser.object_with(kind, |mut histogram| {
                let source = DateHistogramGroupSource {
                    field: histogram.required("field")?,
                    calendar_interval: histogram.optional("calendar_interval")?,
                    fixed_interval: histogram.optional("fixed_interval")?,
                    time_zone: histogram.optional("time_zone")?,
                    missing_bucket: histogram.optional("missing_bucket")?,
                };
                histogram.finish()?;
                Ok(GroupSource::DateHistogram(source))
            })?,
            other => {
                return Err(Error::UnknownGroupSource {
                    path: parser.path().to_string(),
                    name: other.to_string(),
                });
            }
        };

        let path = parser.field_path(kind);
        parser.finish()?;
        source.ok_or(Error::MissingField { path })
    }
}
