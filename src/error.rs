//! Error types for the Q-learning toolkit

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("action set must contain at least one action")]
    EmptyActionSet,

    #[error("duplicate action at position {index} in the action list")]
    DuplicateAction { index: usize },

    #[error("feature extractor returned {got} features, agent is configured for {expected}")]
    FeatureLengthMismatch { expected: usize, got: usize },

    #[error("output index {index} is out of range (agent has {outputs} outputs)")]
    OutputIndexOutOfRange { index: usize, outputs: usize },

    #[error("action is not part of this agent's action set")]
    UnknownAction,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("snapshot does not fit this agent: {message}")]
    SnapshotShape { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
