//! Structured document decoding
//!
//! Transform documents are JSON object trees. Encoding goes through serde's
//! `Serialize`; decoding goes through [`DocumentParser`], which tracks the
//! fields it has consumed so the unknown-field policy can be applied per
//! object and every error carries the dotted path of the field at fault.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

const ROOT_PATH: &str = "_root";

/// How a decode treats fields it does not recognize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Unknown fields fail the decode
    #[default]
    Strict,
    /// Unknown fields are dropped
    Lenient,
}

/// Types that decode themselves from one object of a document
pub trait FromDocument: Sized {
    /// Decode from `parser`, consuming every field the type knows about
    fn from_document(parser: DocumentParser<'_>) -> Result<Self>;
}

/// Cursor over the fields of a single document object
#[derive(Debug)]
pub struct DocumentParser<'a> {
    fields: &'a Map<String, Value>,
    path: String,
    strictness: Strictness,
    consumed: BTreeSet<&'a str>,
}

impl<'a> DocumentParser<'a> {
    /// Start decoding at the root of a document
    pub fn new(document: &'a Value, strictness: Strictness) -> Result<Self> {
        Self::at(String::new(), document, strictness)
    }

    fn at(path: String, value: &'a Value, strictness: Strictness) -> Result<Self> {
        let fields = value.as_object().ok_or_else(|| Error::NotAnObject {
            path: if path.is_empty() {
                ROOT_PATH.to_string()
            } else {
                path.clone()
            },
        })?;
        Ok(Self {
            fields,
            path,
            strictness,
            consumed: BTreeSet::new(),
        })
    }

    /// Dotted path of this object, empty at the root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Unknown-field policy in effect
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Dotted path of a field of this object
    pub fn field_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    /// Field names of this object not yet consumed, in key order
    pub fn remaining(&self) -> Vec<&'a str> {
        let fields = self.fields;
        fields
            .keys()
            .map(String::as_str)
            .filter(|k| !self.consumed.contains(k))
            .collect()
    }

    /// Mark a field consumed and return its value; explicit nulls read as absent
    fn take(&mut self, name: &str) -> Option<&'a Value> {
        let fields = self.fields;
        let (key, value) = fields.get_key_value(name)?;
        self.consumed.insert(key.as_str());
        (!value.is_null()).then_some(value)
    }

    /// Read an optional leaf field
    pub fn optional<T: DeserializeOwned>(&mut self, name: &str) -> Result<Option<T>> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        <T as Deserialize>::deserialize(value)
            .map(Some)
            .map_err(|e| Error::InvalidField {
                path: self.field_path(name),
                message: e.to_string(),
            })
    }

    /// Read a required leaf field
    pub fn required<T: DeserializeOwned>(&mut self, name: &str) -> Result<T> {
        self.optional(name)?.ok_or_else(|| Error::MissingField {
            path: self.field_path(name),
        })
    }

    /// Decode an optional nested object with `decode`
    ///
    /// Any failure inside the nested object is wrapped in
    /// [`Error::MalformedNested`] carrying the field path.
    pub fn object_with<T, F>(&mut self, name: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(DocumentParser<'a>) -> Result<T>,
    {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let path = self.field_path(name);
        let nested = Self::at(path.clone(), value, self.strictness)?;
        decode(nested).map(Some).map_err(|e| Error::nested(path, e))
    }

    /// Decode an optional nested object
    pub fn optional_object<T: FromDocument>(&mut self, name: &str) -> Result<Option<T>> {
        self.object_with(name, T::from_document)
    }

    /// Decode a required object whose every entry is a `T`, keyed by name
    ///
    /// A `null` entry is an error in either mode; it is not an absent field.
    pub fn required_map<T: FromDocument>(&mut self, name: &str) -> Result<BTreeMap<String, T>> {
        let entries = self.object_with(name, |mut map| {
            let mut entries = BTreeMap::new();
            for key in map.remaining() {
                let entry = map
                    .optional_object::<T>(key)?
                    .ok_or_else(|| Error::MissingField {
                        path: map.field_path(key),
                    })?;
                entries.insert(key.to_string(), entry);
            }
            map.finish()?;
            Ok(entries)
        })?;
        entries.ok_or_else(|| Error::MissingField {
            path: self.field_path(name),
        })
    }

    /// Apply the unknown-field policy to whatever was not consumed
    pub fn finish(self) -> Result<()> {
        for name in self.remaining() {
            match self.strictness {
                Strictness::Strict => {
                    return Err(Error::UnknownField {
                        path: self.field_path(name),
                    });
                }
                Strictness::Lenient => {
                    tracing::debug!(field = %self.field_path(name), "ignoring unknown field");
                }
            }
        }
        Ok(())
    }
}
