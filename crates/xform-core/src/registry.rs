//! Named function parsers
//!
//! The function of a transform is written under a top-level key naming its
//! type (`pivot`, `latest`). Decoding resolves that key through a
//! [`ParserRegistry`] so the transform decoder does not hard-code every
//! function type it may meet.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::document::{DocumentParser, FromDocument};
use crate::error::Result;
use crate::latest::LatestConfig;
use crate::pivot::PivotConfig;
use crate::transform::FunctionConfig;

/// Decoder for one named function type
pub trait FunctionParser: Send + Sync {
    /// Decode the function object at `parser`
    fn parse(&self, parser: DocumentParser<'_>) -> Result<FunctionConfig>;
}

struct PivotParser;

impl FunctionParser for PivotParser {
    fn parse(&self, parser: DocumentParser<'_>) -> Result<FunctionConfig> {
        PivotConfig::from_document(parser).map(FunctionConfig::Pivot)
    }
}

struct LatestParser;

impl FunctionParser for LatestParser {
    fn parse(&self, parser: DocumentParser<'_>) -> Result<FunctionConfig> {
        LatestConfig::from_document(parser).map(FunctionConfig::Latest)
    }
}

static BUILTIN: LazyLock<ParserRegistry> = LazyLock::new(ParserRegistry::default);

/// Lookup table from field name to function parser
pub struct ParserRegistry {
    parsers: BTreeMap<String, Box<dyn FunctionParser>>,
}

impl ParserRegistry {
    /// Registry that resolves nothing
    pub fn empty() -> Self {
        Self {
            parsers: BTreeMap::new(),
        }
    }

    /// Shared registry resolving `pivot` and `latest`
    pub fn builtin() -> &'static ParserRegistry {
        &BUILTIN
    }

    /// Register `parser` under `name`, replacing any previous entry
    ///
    /// `name` must be the field the produced function encodes under (see
    /// [`FunctionConfig::name`]); a transform decode rejects a parser that
    /// returns a function of another name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        parser: impl FunctionParser + 'static,
    ) -> &mut Self {
        self.parsers.insert(name.into(), Box::new(parser));
        self
    }

    /// Parser registered under `name`
    pub fn resolve(&self, name: &str) -> Option<&dyn FunctionParser> {
        self.parsers.get(name).map(Box::as_ref)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("pivot", PivotParser)
            .register("latest", LatestParser);
        registry
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
