//! Transport error types.
//!
//! This module defines the errors raised when no HTTP response could be
//! obtained from the Solr endpoint.

use thiserror::Error;

/// Errors that can occur while sending a request to Solr.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    /// Failed to establish a connection to the endpoint.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The request could not be built (bad URL, header, client setup).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be read.
    #[error("Body error: {0}")]
    BodyError(String),
}

impl TransportError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Whether sending the same request again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionError(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionError(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::BodyError(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::ConnectionError(err.to_string())
        }
    }
}
