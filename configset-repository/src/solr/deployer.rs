//! Configset deployment to a Solr core.

use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::errors::{DeployError, TransportError};
use crate::interfaces::{ConfigFileProvider, HttpResponse, SolrTransport};
use crate::solr::archive::ArchiveBuilder;
use crate::solr::requests::{self, is_batch_success, is_file_success};
use configset_shared::{
    ConfigFileSet, DeploymentResult, DeploymentStrategy, DeploymentTarget, UploadAttempt,
};

/// Pushes a server's configuration files to a remote Solr core.
///
/// The strategy is resolved once, before construction, from the execution
/// environment (see `EnvironmentSignals::resolve`). Every call is sequential:
/// each request is awaited before the next one is built.
///
/// Hard failures (provider, archive, no HTTP response) are returned as
/// `DeployError`. A response with a non-success status is not an error; it is
/// reported in the returned `DeploymentResult` and logged.
///
/// # Example
///
/// ```ignore
/// let deployer = SchemaDeployer::new(transport, provider, target, signals.resolve());
/// let result = deployer.deploy("default").await?;
/// println!("{}", result.summary());
/// ```
pub struct SchemaDeployer {
    transport: Arc<dyn SolrTransport>,
    provider: Arc<dyn ConfigFileProvider>,
    target: DeploymentTarget,
    archive_builder: ArchiveBuilder,
    strategy: Option<DeploymentStrategy>,
}

impl SchemaDeployer {
    /// Create a deployer for `target` using the resolved `strategy`.
    pub fn new(
        transport: Arc<dyn SolrTransport>,
        provider: Arc<dyn ConfigFileProvider>,
        target: DeploymentTarget,
        strategy: Option<DeploymentStrategy>,
    ) -> Self {
        Self {
            transport,
            provider,
            target,
            archive_builder: ArchiveBuilder::new(),
            strategy,
        }
    }

    /// Use a custom archive builder for the zip strategy.
    pub fn with_archive_builder(mut self, archive_builder: ArchiveBuilder) -> Self {
        self.archive_builder = archive_builder;
        self
    }

    /// Deploy the configset of `server_id` with the resolved strategy.
    ///
    /// # Returns
    ///
    /// * `Ok(DeploymentResult)` - A response was received for every request;
    ///   check `is_success()` for the outcome
    /// * `Err(DeployError::NoStrategy)` - The environment resolved to no strategy
    /// * `Err(DeployError::Provider)` - The files could not be loaded; nothing was sent
    /// * `Err(DeployError::Transport)` - No response was received; for the
    ///   sequential strategy, no request got a response
    /// * `Err(DeployError::Archive)` - The zip archive could not be built
    #[instrument(skip(self), fields(core = %self.target.core()))]
    pub async fn deploy(&self, server_id: &str) -> Result<DeploymentResult, DeployError> {
        let strategy = self.strategy.ok_or_else(|| {
            error!(server_id = %server_id, "No deployment strategy matches the environment");
            DeployError::NoStrategy
        })?;

        let files = self.provider.get_files(server_id).await.map_err(|e| {
            error!(server_id = %server_id, error = %e, "Failed to load config files");
            e
        })?;

        let deployment_id = Uuid::new_v4();
        info!(
            deployment_id = %deployment_id,
            server_id = %server_id,
            strategy = %strategy,
            files = files.len(),
            "Deploying configset"
        );

        let attempts = match strategy {
            DeploymentStrategy::DirectMultiFile => {
                let response = self.upload_direct(&files).await;
                vec![Self::classify_batch("direct", response)?]
            }
            DeploymentStrategy::ZipArchive => {
                let response = self.put_archive(&files).await;
                vec![Self::classify_batch("archive", response)?]
            }
            DeploymentStrategy::PerFileSequential => {
                let (attempts, first_error) = self.send_files(&files).await;
                match first_error {
                    Some(e) if attempts.iter().all(|a| a.status.is_none()) => {
                        let result =
                            DeploymentResult::new(deployment_id, server_id, strategy, attempts);
                        error!(
                            deployment_id = %deployment_id,
                            server_id = %server_id,
                            strategy = %strategy,
                            error = %e,
                            "{}",
                            result.summary()
                        );
                        return Err(DeployError::Transport(e));
                    }
                    _ => attempts,
                }
            }
        };

        let result = DeploymentResult::new(deployment_id, server_id, strategy, attempts);
        let last = result.attempts.last();
        let status = last.and_then(|a| a.status);
        let reason = last.map(|a| a.reason.as_str()).unwrap_or_default();
        if result.is_success() {
            info!(
                deployment_id = %deployment_id,
                server_id = %server_id,
                strategy = %strategy,
                status = ?status,
                reason = %reason,
                "{}",
                result.summary()
            );
        } else {
            error!(
                deployment_id = %deployment_id,
                server_id = %server_id,
                strategy = %strategy,
                status = ?status,
                reason = %reason,
                failed = result.failed(),
                "{}",
                result.summary()
            );
        }

        Ok(result)
    }

    /// Upload every file in one JSON request.
    ///
    /// The body is `{"files":[{"filename":..,"content":<base64>},..]}`, posted
    /// to the schema upload endpoint. The raw response is returned for status
    /// inspection.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn upload_direct(&self, files: &ConfigFileSet) -> Result<HttpResponse, DeployError> {
        for (filename, content) in files.iter() {
            info!(filename = %filename, bytes = content.len(), "Encoding config file");
        }

        let request = requests::direct_upload_request(&self.target, files)?;
        let response = self.transport.send(request).await.map_err(|e| {
            error!(error = %e, "Direct upload got no response");
            e
        })?;

        if is_batch_success(response.status) {
            info!(
                status = response.status,
                reason = %response.reason,
                "Direct upload accepted"
            );
        } else {
            error!(
                status = response.status,
                reason = %response.reason,
                body = %String::from_utf8_lossy(&response.body),
                "Direct upload rejected"
            );
        }

        Ok(response)
    }

    /// Upload files one request at a time.
    ///
    /// Every file is attempted, in filename order, regardless of earlier
    /// failures. Returns one attempt per file. A transport failure is recorded
    /// as an attempt with no status.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn upload_sequential(&self, files: &ConfigFileSet) -> Vec<UploadAttempt> {
        self.send_files(files).await.0
    }

    /// Send one request per file, keeping the first transport error.
    async fn send_files(
        &self,
        files: &ConfigFileSet,
    ) -> (Vec<UploadAttempt>, Option<TransportError>) {
        let mut attempts = Vec::with_capacity(files.len());
        let mut first_error = None;

        for (filename, content) in files.iter() {
            let request = requests::file_upload_request(&self.target, filename, content);

            let attempt = match self.transport.send(request).await {
                Ok(response) => UploadAttempt::new(
                    filename,
                    Some(response.status),
                    response.reason,
                    is_file_success(response.status),
                ),
                Err(e) => {
                    let attempt = UploadAttempt::no_response(filename, e.to_string());
                    first_error.get_or_insert(e);
                    attempt
                }
            };

            if attempt.success {
                info!(
                    filename = %filename,
                    status = ?attempt.status,
                    "File {}: {}",
                    filename,
                    attempt.message()
                );
            } else {
                error!(
                    filename = %filename,
                    status = ?attempt.status,
                    reason = %attempt.reason,
                    "File {}: {}",
                    filename,
                    attempt.message()
                );
            }

            attempts.push(attempt);
        }

        (attempts, first_error)
    }

    /// Load the files of `server_id`, zip them and PUT the archive to the
    /// configset API.
    ///
    /// The temporary archive is removed before this returns.
    #[instrument(skip(self))]
    pub async fn upload_archive(&self, server_id: &str) -> Result<HttpResponse, DeployError> {
        let files = self.provider.get_files(server_id).await?;
        self.put_archive(&files).await
    }

    async fn put_archive(&self, files: &ConfigFileSet) -> Result<HttpResponse, DeployError> {
        let archive = self.archive_builder.build_zip(files)?;
        let bytes = archive.read().await?;

        info!(
            path = %archive.path().display(),
            entries = archive.entries(),
            bytes = bytes.len(),
            "Uploading configset archive"
        );

        let request = requests::archive_upload_request(&self.target, bytes);
        let response = self.transport.send(request).await.map_err(|e| {
            error!(error = %e, "Archive upload got no response");
            e
        })?;

        if is_batch_success(response.status) {
            info!(
                status = response.status,
                reason = %response.reason,
                "Archive upload accepted"
            );
        } else {
            error!(
                status = response.status,
                reason = %response.reason,
                body = %String::from_utf8_lossy(&response.body),
                "Archive upload rejected"
            );
        }

        Ok(response)
    }

    /// Turn a whole-call response into an attempt. A missing response is
    /// logged with the summary line and propagated.
    fn classify_batch(
        label: &str,
        response: Result<HttpResponse, DeployError>,
    ) -> Result<UploadAttempt, DeployError> {
        match response {
            Ok(response) => Ok(UploadAttempt::new(
                label,
                Some(response.status),
                response.reason,
                is_batch_success(response.status),
            )),
            Err(DeployError::Transport(e)) => {
                let attempt = UploadAttempt::no_response(label, e.to_string());
                error!(error = %e, "{}", attempt.message());
                Err(DeployError::Transport(e))
            }
            Err(e) => Err(e),
        }
    }
}
