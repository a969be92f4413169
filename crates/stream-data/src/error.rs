use std::{io, path::PathBuf};
use thiserror::Error;

/// Failure while promoting raw tree values into typed entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("'{value}' is not a valid {domain}")]
    UnknownVariant { domain: &'static str, value: String },

    #[error("{entity} is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity} has no field named '{field}'")]
    UnknownField { entity: &'static str, field: String },

    #[error("invalid {entity}.{field}: {reason}")]
    InvalidField {
        entity: &'static str,
        field: String,
        reason: String,
    },

    #[error("{entity} must be a mapping")]
    NotAMapping { entity: &'static str },

    #[error("stream store must contain a sequence of streams")]
    NotASequence,
}

/// Errors surfaced by the persistence functions.
#[derive(Debug, Error)]
pub enum Error {
    /// The text could not be parsed into (or emitted from) a YAML tree.
    #[error("invalid stream store format: {0}")]
    Format(#[from] serde_yaml::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("stream store {path:?} is not accessible: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
