//! Config file provider trait definition.

use async_trait::async_trait;

use crate::errors::ProviderError;
use configset_shared::ConfigFileSet;

/// Source of the configuration files that make up a server's configset.
///
/// Implementations are injected into `SchemaDeployer` so the deployer never
/// needs to know where the files come from (a directory on disk, a settings
/// store, generated on the fly).
#[async_trait]
pub trait ConfigFileProvider: Send + Sync {
    /// Load the files to deploy for `server_id`.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigFileSet)` - The files, keyed by filename
    /// * `Err(ProviderError::ServerNotFound)` - If no such server configuration exists
    /// * `Err(ProviderError::ConfigRetrievalError)` - If the files could not be loaded
    async fn get_files(&self, server_id: &str) -> Result<ConfigFileSet, ProviderError>;
}
