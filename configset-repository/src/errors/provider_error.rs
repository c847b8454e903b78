//! Config file provider error types.

use thiserror::Error;

/// Errors that can occur while loading the files of a server configuration.
///
/// Both variants abort the current deploy call before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No server configuration exists for the given id.
    #[error("Server not found: {0}")]
    ServerNotFound(String),

    /// The server configuration exists but its files could not be loaded.
    #[error("Config retrieval error: {0}")]
    ConfigRetrievalError(String),
}

impl ProviderError {
    /// Create a server not found error.
    pub fn server_not_found(server_id: impl Into<String>) -> Self {
        Self::ServerNotFound(server_id.into())
    }

    /// Create a config retrieval error.
    pub fn config_retrieval(msg: impl Into<String>) -> Self {
        Self::ConfigRetrievalError(msg.into())
    }
}
