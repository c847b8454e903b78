//! Deployment error types.
//!
//! Only hard failures are represented here. A response with a non-success
//! status is not an error: it is reported through `UploadAttempt` and the
//! caller inspects the returned result.

use thiserror::Error;

use super::{ArchiveError, ProviderError, TransportError};

/// Errors that abort a deployment operation.
#[derive(Error, Debug)]
pub enum DeployError {
    /// The server configuration could not be loaded.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// No HTTP response was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The zip archive could not be built.
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// The environment did not resolve to a deployment strategy.
    #[error("No deployment strategy matches the current environment")]
    NoStrategy,

    /// The request payload could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DeployError {
    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
