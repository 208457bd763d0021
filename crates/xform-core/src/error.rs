//! Error types for xform-core

use thiserror::Error;

/// Result type alias for xform-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or encoding transform documents
#[derive(Error, Debug)]
pub enum Error {
    /// Field not recognized by a strict decode
    #[error("unknown field [{path}]")]
    UnknownField {
        /// Dotted path of the offending field
        path: String,
    },

    /// Required field absent from the document
    #[error("missing required field [{path}]")]
    MissingField {
        /// Dotted path of the missing field
        path: String,
    },

    /// Field present but of the wrong shape or type
    #[error("invalid value for field [{path}]: {message}")]
    InvalidField {
        /// Dotted path of the field
        path: String,
        /// Description of what's invalid
        message: String,
    },

    /// A nested sub-object failed its own decode
    #[error("failed to parse field [{path}]: {source}")]
    MalformedNested {
        /// Dotted path of the nested object
        path: String,
        /// Error raised by the nested decoder
        source: Box<Error>,
    },

    /// Document carries more than one function
    #[error(
        "transform config must define only one of [pivot, latest], found [{first}] and [{second}]"
    )]
    ConflictingFunctions {
        /// Function field decoded first
        first: String,
        /// Function field that conflicts with it
        second: String,
    },

    /// Group source type not known to the pivot decoder
    #[error("unknown group source type [{name}] at [{path}]")]
    UnknownGroupSource {
        /// Dotted path of the group
        path: String,
        /// Group source type name found in the document
        name: String,
    },

    /// Expected an object but found another kind of value
    #[error("expected an object at [{path}]")]
    NotAnObject {
        /// Dotted path of the value
        path: String,
    },

    /// Preview request without a config cannot be encoded
    #[error("preview request has no transform config to encode")]
    MissingConfig,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a YAML document
    #[error("failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Wrap a nested decoder failure with the path of the object it was decoding
    pub fn nested(path: impl Into<String>, source: Error) -> Self {
        Self::MalformedNested {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
