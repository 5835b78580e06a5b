//! Error types for the type model.

use thiserror::Error;

/// A string did not name a known Leo type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type name '{name}'")]
pub struct ParseTypeError {
    /// The offending name.
    pub name: String,
}

impl ParseTypeError {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        ParseTypeError { name: name.into() }
    }
}
