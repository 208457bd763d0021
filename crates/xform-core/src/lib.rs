//! xform Core Library
//!
//! This crate provides the request contract for previewing a transform:
//! - Transform configuration model (source, pivot/latest function, destination)
//! - Shape validation with aggregated, human-readable messages
//! - Document codec with strict and lenient unknown-field policies
//! - Registry of named function parsers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Document   │────▶│  Transform  │────▶│   Preview   │
//! │   (JSON)    │     │   Config    │     │   Request   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use xform_core::{PreviewTransformRequest, Strictness, TransformConfig};
//!
//! let config = TransformConfig::from_json_str(body, Strictness::Strict)?;
//! let request = PreviewTransformRequest::from(config);
//! request.validate()?;
//! let document = request.to_document()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod destination;
pub mod document;
pub mod error;
pub mod latest;
pub mod pivot;
pub mod preview;
pub mod registry;
pub mod settings;
pub mod source;
pub mod transform;
pub mod validation;

pub use destination::DestConfig;
pub use document::{DocumentParser, FromDocument, Strictness};
pub use error::{Error, Result};
pub use latest::LatestConfig;
pub use pivot::{GroupSource, PivotConfig};
pub use preview::PreviewTransformRequest;
pub use registry::{FunctionParser, ParserRegistry};
pub use settings::{SettingsConfig, SyncConfig, TimeSyncConfig};
pub use source::SourceConfig;
pub use transform::{FunctionConfig, TransformConfig, TransformConfigBuilder, ValidationMode};
pub use validation::{ValidationError, ValidationErrorBuilder};
