//! Configuration and dependency wiring for the deployer.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::DeployerSettings;
