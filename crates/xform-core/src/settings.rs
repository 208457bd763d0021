//! Behavioral settings and continuous-mode sync

use serde::Serialize;

use crate::document::{DocumentParser, FromDocument};
use crate::error::{Error, Result};

/// Tuning knobs passed through to the execution engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SettingsConfig {
    /// Composite aggregation page size used while searching the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_page_search_size: Option<i32>,

    /// Throttle on input documents per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_per_second: Option<f64>,

    /// Write dates as epoch millis instead of formatted strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_as_epoch_millis: Option<bool>,
}

impl FromDocument for SettingsConfig {
    fn from_document(mut parser: DocumentParser<'_>) -> Result<Self> {
        let settings = Self {
            max_page_search_size: parser.optional("max_page_search_size")?,
            docs_per_second: parser.optional("docs_per_second")?,
            dates_as_epoch_millis: parser.optional("dates_as_epoch_millis")?,
        };
        parser.finish()?;
        Ok(settings)
    }
}

/// How a continuous transform detects new source data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncConfig {
    /// Timestamp-based change detection
    Time(TimeSyncConfig),
}

/// Timestamp-based sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSyncConfig {
    /// Timestamp field used to detect changes
    pub field: String,

    /// Lag behind the current time to allow for ingest delay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
}

impl TimeSyncConfig {
    /// Sync on `field` with the engine's default delay
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            delay: None,
        }
    }
}

impl FromDocument for TimeSyncConfig {
    fn from_document(mut parser: DocumentParser<'_>) -> Result<Self> {
        let field = parser.required("field")?;
        let delay = parser.optional("delay")?;
        parser.finish()?;
        Ok(Self { field, delay })
    }
}

impl FromDocument for SyncConfig {
    fn from_document(mut parser: DocumentParser<'_>) -> Result<Self> {
        let time = parser.optional_object::<TimeSyncConfig>("time")?;
        let path = parser.field_path("time");
        parser.finish()?;
        time.map(SyncConfig::Time)
            .ok_or(Error::MissingField { path })
    }
}
