//! # Configset Shared
//!
//! Plain data types shared by the configset repository and the deployer
//! binary: the file set being deployed, the remote core it is deployed to,
//! the deployment strategy, and the per-call deployment result.

mod deployment;
mod files;
mod target;

pub use deployment::{
    DeploymentResult, DeploymentStrategy, EnvironmentSignals, ParseStrategyError, UploadAttempt,
};
pub use files::{ConfigFileError, ConfigFileSet};
pub use target::DeploymentTarget;
