//! Transform configuration
//!
//! A transform reads from a [`SourceConfig`], applies exactly one function
//! ([`PivotConfig`] or [`LatestConfig`]) and, once stored, writes into a
//! [`DestConfig`]. Previews need neither an id nor a destination.
//!
//! # Example
//!
//! ```json
//! {
//!   "id": "orders-by-customer",
//!   "source": { "index": ["orders"] },
//!   "dest": { "index": "orders-by-customer" },
//!   "latest": { "unique_key": ["customer_id"], "sort": "@timestamp" },
//!   "frequency": "5m"
//! }
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::destination::DestConfig;
use crate::document::{DocumentParser, Strictness};
use crate::error::{Error, Result};
use crate::latest::LatestConfig;
use crate::pivot::PivotConfig;
use crate::registry::ParserRegistry;
use crate::settings::{SettingsConfig, SyncConfig};
use crate::source::SourceConfig;
use crate::validation::{ValidationError, ValidationErrorBuilder};

// Fields decoded directly; any other field is looked up in the function registry
const ID: &str = "id";
const SOURCE: &str = "source";
const DEST: &str = "dest";
const DESCRIPTION: &str = "description";
const FREQUENCY: &str = "frequency";
const SYNC: &str = "sync";
const SETTINGS: &str = "settings";
const VERSION: &str = "version";
const CREATE_TIME: &str = "create_time";

/// The function a transform applies; exactly one per transform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionConfig {
    /// Group and aggregate
    Pivot(PivotConfig),
    /// Keep the most recent document per key
    Latest(LatestConfig),
}

impl FunctionConfig {
    /// Field name the function is written under
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pivot(_) => "pivot",
            Self::Latest(_) => "latest",
        }
    }

    fn check(&self, errors: &mut ValidationErrorBuilder) {
        match self {
            Self::Pivot(pivot) => pivot.check(errors),
            Self::Latest(latest) => latest.check(errors),
        }
    }
}

impl From<PivotConfig> for FunctionConfig {
    fn from(pivot: PivotConfig) -> Self {
        Self::Pivot(pivot)
    }
}

impl From<LatestConfig> for FunctionConfig {
    fn from(latest: LatestConfig) -> Self {
        Self::Latest(latest)
    }
}

/// Which rules [`TransformConfig::validate`] applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Dry run: id and destination may be absent
    #[default]
    Preview,
    /// Creating a transform: id and destination are required
    Stored,
}

/// Declarative description of a transform
///
/// Immutable once built. Every optional field stays distinguishable from a
/// present default through encode and decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransformConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SourceConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    dest: Option<DestConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    frequency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    sync: Option<SyncConfig>,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    function: Option<FunctionConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    settings: Option<SettingsConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    create_time: Option<i64>,
}

impl TransformConfig {
    /// Start building a config; every field starts absent
    pub fn builder() -> TransformConfigBuilder {
        TransformConfigBuilder::default()
    }

    /// Config for a preview: source and function only
    pub fn for_preview(source: SourceConfig, function: impl Into<FunctionConfig>) -> Self {
        Self {
            source: Some(source),
            function: Some(function.into()),
            ..Self::default()
        }
    }

    /// Transform identifier
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Input query and indices
    pub fn source(&self) -> Option<&SourceConfig> {
        self.source.as_ref()
    }

    /// Output index
    pub fn dest(&self) -> Option<&DestConfig> {
        self.dest.as_ref()
    }

    /// Free-form description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Interval between checks for changes, e.g. `1m`
    pub fn frequency(&self) -> Option<&str> {
        self.frequency.as_deref()
    }

    /// Continuous-mode sync
    pub fn sync(&self) -> Option<&SyncConfig> {
        self.sync.as_ref()
    }

    /// The function, whichever variant it is
    pub fn function(&self) -> Option<&FunctionConfig> {
        self.function.as_ref()
    }

    /// The pivot function, if that is the variant set
    pub fn pivot(&self) -> Option<&PivotConfig> {
        match &self.function {
            Some(FunctionConfig::Pivot(pivot)) => Some(pivot),
            _ => None,
        }
    }

    /// The latest function, if that is the variant set
    pub fn latest(&self) -> Option<&LatestConfig> {
        match &self.function {
            Some(FunctionConfig::Latest(latest)) => Some(latest),
            _ => None,
        }
    }

    /// Engine settings
    pub fn settings(&self) -> Option<&SettingsConfig> {
        self.settings.as_ref()
    }

    /// Version of the engine that created the transform
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Creation time in epoch milliseconds
    pub fn create_time(&self) -> Option<i64> {
        self.create_time
    }

    /// Check the shape of the config, reporting every problem at once
    pub fn validate(&self, mode: ValidationMode) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationErrorBuilder::new();
        self.collect_issues(mode, &mut errors);
        errors.build()
    }

    pub(crate) fn collect_issues(&self, mode: ValidationMode, errors: &mut ValidationErrorBuilder) {
        match &self.source {
            Some(source) => source.check(errors),
            None => {
                errors.add("transform source cannot be null");
            }
        }
        match &self.function {
            Some(function) => function.check(errors),
            None => {
                errors.add("transform function cannot be null, one of [pivot, latest] must be set");
            }
        }
        if mode == ValidationMode::Stored {
            if let Some(dest) = &self.dest {
                dest.check(errors);
            }
            errors
                .add_if(self.id.is_none(), "transform id cannot be null")
                .add_if(self.dest.is_none(), "transform destination cannot be null");
        }
    }

    /// Encode as a document; absent fields are omitted
    pub fn to_document(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Encode as compact JSON text
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as indented JSON text
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a document using the built-in function parsers
    pub fn from_document(document: &Value, strictness: Strictness) -> Result<Self> {
        Self::from_document_with(document, strictness, ParserRegistry::builtin())
    }

    /// Decode a document, resolving function fields through `registry`
    pub fn from_document_with(
        document: &Value,
        strictness: Strictness,
        registry: &ParserRegistry,
    ) -> Result<Self> {
        Self::parse(DocumentParser::new(document, strictness)?, registry)
    }

    /// Decode JSON text
    pub fn from_json_str(json: &str, strictness: Strictness) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_document(&document, strictness)
    }

    /// Decode YAML text
    pub fn from_yaml_str(yaml: &str, strictness: Strictness) -> Result<Self> {
        let document: Value = serde_yaml::from_str(yaml)?;
        Self::from_document(&document, strictness)
    }

    fn parse(mut parser: DocumentParser<'_>, registry: &ParserRegistry) -> Result<Self> {
        let mut config = Self {
            id: parser.optional(ID)?,
            source: parser.optional_object(SOURCE)?,
            dest: parser.optional_object(DEST)?,
            description: parser.optional(DESCRIPTION)?,
            frequency: parser.optional(FREQUENCY)?,
            sync: parser.optional_object(SYNC)?,
            function: None,
            settings: parser.optional_object(SETTINGS)?,
            version: parser.optional(VERSION)?,
            create_time: parser.optional(CREATE_TIME)?,
        };

        for name in parser.remaining() {
            let Some(function_parser) = registry.resolve(name) else {
                continue;
            };
            let Some(function) = parser.object_with(name, |nested| function_parser.parse(nested))?
            else {
                continue;
            };
            if function.name() != name {
                return Err(Error::InvalidField {
                    path: parser.field_path(name),
                    message: format!(
                        "parser registered as [{}] produced a [{}] function",
                        name,
                        function.name()
                    ),
                });
            }
            if let Some(first) = &config.function {
                return Err(Error::ConflictingFunctions {
                    first: first.name().to_string(),
                    second: function.name().to_string(),
                });
            }
            config.function = Some(function);
        }

        parser.finish()?;
        Ok(config)
    }
}

/// Fluent constructor for [`TransformConfig`]
///
/// `build` never fails; an incomplete config is reported by
/// [`TransformConfig::validate`]. Setting a second function replaces the first.
#[derive(Debug, Default)]
#[must_use]
pub struct TransformConfigBuilder {
    config: TransformConfig,
}

impl TransformConfigBuilder {
    /// Set the transform id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.config.id = Some(id.into());
        self
    }

    /// Set the source
    pub fn source(mut self, source: SourceConfig) -> Self {
        self.config.source = Some(source);
        self
    }

    /// Set the destination
    pub fn dest(mut self, dest: DestConfig) -> Self {
        self.config.dest = Some(dest);
        self
    }

    /// Set the function
    pub fn function(mut self, function: impl Into<FunctionConfig>) -> Self {
        self.config.function = Some(function.into());
        self
    }

    /// Set a pivot function
    pub fn pivot(self, pivot: PivotConfig) -> Self {
        self.function(pivot)
    }

    /// Set a latest function
    pub fn latest(self, latest: LatestConfig) -> Self {
        self.function(latest)
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.config.description = Some(description.into());
        self
    }

    /// Set the check frequency
    pub fn frequency(mut self, frequency: impl Into<String>) -> Self {
        self.config.frequency = Some(frequency.into());
        self
    }

    /// Set continuous-mode sync
    pub fn sync(mut self, sync: SyncConfig) -> Self {
        self.config.sync = Some(sync);
        self
    }

    /// Set engine settings
    pub fn settings(mut self, settings: SettingsConfig) -> Self {
        self.config.settings = Some(settings);
        self
    }

    /// Set the creating engine version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = Some(version.into());
        self
    }

    /// Set the creation time in epoch milliseconds
    pub fn create_time(mut self, create_time: i64) -> Self {
        self.config.create_time = Some(create_time);
        self
    }

    /// Finish building
    pub fn build(self) -> TransformConfig {
        self.config
    }
}
