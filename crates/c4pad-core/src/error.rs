//! Error raised when a textual kind name is not part of a known vocabulary.

use thiserror::Error;

/// A kind name that does not belong to the vocabulary it was parsed against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {vocabulary} `{name}`")]
pub struct UnknownKindError {
    vocabulary: &'static str,
    name: String,
}

impl UnknownKindError {
    pub(crate) fn new(vocabulary: &'static str, name: impl Into<String>) -> Self {
        Self {
            vocabulary,
            name: name.into(),
        }
    }

    /// The vocabulary the name was checked against (e.g. `"diagram kind"`).
    pub fn vocabulary(&self) -> &'static str {
        self.vocabulary
    }

    /// The rejected name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
