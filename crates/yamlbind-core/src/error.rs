//! Error types for yamlbind-core

use thiserror::Error;

use crate::validate::Violations;

/// Result type alias for yamlbind-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing a typed document
#[derive(Error, Debug)]
pub enum Error {
    /// Text is not well-formed YAML, or does not fit the target type
    #[error("failed to parse document: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// Document parsed but violated one or more declared constraints
    ///
    /// The message lists every violation, one per line.
    #[error("{0}")]
    Validation(Violations),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be represented as YAML
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl Error {
    /// Violations carried by a validation failure, if this is one
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Error::Validation(violations) => Some(violations),
            _ => None,
        }
    }
}
