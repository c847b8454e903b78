//! Dependency initialization and wiring for the deployer.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::DeployerSettings;
use crate::DeployerError;
use configset_repository::{
    ArchiveBuilder, ConfigFileProvider, DirectoryConfigProvider, ReqwestTransport,
    SchemaDeployer, SchemaViewer, SolrTransport,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Deployer bound to the configured core and resolved strategy.
    pub deployer: SchemaDeployer,
    /// Viewer sharing the deployer's transport.
    pub viewer: SchemaViewer,
    /// Source of the files to deploy.
    pub provider: Arc<dyn ConfigFileProvider>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(DeployerError)` - If configuration is invalid or the transport cannot be built
    pub fn new() -> Result<Self, DeployerError> {
        let settings = DeployerSettings::from_env()?;
        let transport = ReqwestTransport::new(settings.transport.clone())?;
        Ok(Self::with_transport(settings, Arc::new(transport)))
    }

    /// Wire dependencies around an existing transport.
    pub fn with_transport(settings: DeployerSettings, transport: Arc<dyn SolrTransport>) -> Self {
        let strategy = settings.signals.resolve();

        info!(
            base_url = %settings.target.base_uri(),
            core = %settings.target.core(),
            schema_upload_url = %settings.target.schema_upload_uri(),
            config_dir = %settings.config_dir.display(),
            strategy = ?strategy,
            "Initializing dependencies"
        );

        if strategy.is_none() {
            warn!("Neither SOLR_MANAGED_PLATFORM nor SOLR_LOCAL_DEVELOPMENT is set; deploy will be refused");
        }

        let provider: Arc<dyn ConfigFileProvider> =
            Arc::new(DirectoryConfigProvider::new(settings.config_dir.clone()));

        let archive_builder = match &settings.archive_dir {
            Some(dir) => ArchiveBuilder::in_dir(dir),
            None => ArchiveBuilder::new(),
        };

        let deployer = SchemaDeployer::new(
            transport.clone(),
            provider.clone(),
            settings.target.clone(),
            strategy,
        )
        .with_archive_builder(archive_builder);

        let viewer = SchemaViewer::new(transport, settings.target);

        Self {
            deployer,
            viewer,
            provider,
        }
    }
}
