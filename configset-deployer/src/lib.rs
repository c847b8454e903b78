//! # Configset Deployer
//!
//! Command-line entry point for pushing a Solr configset to a managed or
//! local core.
//!
//! This crate provides the CLI definition, the environment configuration and
//! the wiring of the repository components.

pub mod cli;
pub mod commands;
pub mod config;

pub use commands::{execute, CommandOutput};
pub use config::{Dependencies, DeployerSettings};

use configset_repository::{DeployError, ProviderError, TransportError};
use thiserror::Error;

/// Errors that can occur during deployer initialization or execution.
#[derive(Error, Debug)]
pub enum DeployerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Deployment error.
    #[error("Deployment error: {0}")]
    DeployError(#[from] DeployError),

    /// Config file provider error.
    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),

    /// Transport setup error.
    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    /// Output serialization error.
    #[error("Output error: {0}")]
    OutputError(#[from] serde_json::Error),
}

impl DeployerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
