//! Error types for the configset repository.

mod archive_error;
mod deploy_error;
mod provider_error;
mod transport_error;

pub use archive_error::ArchiveError;
pub use deploy_error::DeployError;
pub use provider_error::ProviderError;
pub use transport_error::TransportError;
