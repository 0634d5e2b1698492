//! Error types for asyncapi-tmctl

use std::path::PathBuf;

/// Result type for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The AsyncAPI document could not be parsed or references something it does not declare
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A protocol branch needs a subscribe binding field the channel does not provide
    #[error("Malformed document: channel '{channel}' is missing subscribe binding field '{field}'")]
    MissingBindingField {
        channel: String,
        field: &'static str,
    },

    /// Resource template error
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    KubeError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File system error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error describes a problem in the input document
    pub fn is_malformed_document(&self) -> bool {
        matches!(
            self,
            Error::MalformedDocument(_) | Error::MissingBindingField { .. }
        )
    }
}
