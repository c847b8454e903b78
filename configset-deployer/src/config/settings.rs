//! Deployer settings read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use configset_repository::TransportConfig;
use configset_shared::{DeploymentStrategy, DeploymentTarget, EnvironmentSignals};
use url::Url;

use crate::DeployerError;

/// Default Solr root URL.
const DEFAULT_SOLR_BASE_URL: &str = "http://localhost:8983/solr";

/// Default Solr core name.
const DEFAULT_SOLR_CORE: &str = "search";

/// Default directory holding one subdirectory per server configuration.
const DEFAULT_CONFIG_DIR: &str = "./solr-config";

/// Settings for one deployer run.
#[derive(Debug, Clone)]
pub struct DeployerSettings {
    pub target: DeploymentTarget,
    pub config_dir: PathBuf,
    /// Directory for temporary archives; the system temp dir when `None`.
    pub archive_dir: Option<PathBuf>,
    pub signals: EnvironmentSignals,
    pub transport: TransportConfig,
}

impl DeployerSettings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `SOLR_BASE_URL`: Solr root URL (default: http://localhost:8983/solr)
    /// - `SOLR_CORE`: Core name (default: search)
    /// - `SOLR_SCHEMA_UPLOAD_URL`: Schema upload endpoint (default: `<base>/<core>/schema/upload`)
    /// - `SOLR_CONFIG_DIR`: Root of the server configurations (default: ./solr-config)
    /// - `SOLR_ARCHIVE_DIR`: Directory for temporary zip archives (default: system temp dir)
    /// - `SOLR_MANAGED_PLATFORM`: Set when running on the managed platform
    /// - `SOLR_LOCAL_DEVELOPMENT`: Set when running in a local development container
    /// - `SOLR_DEPLOY_STRATEGY`: `direct`, `zip` or `sequential`; overrides both signals
    /// - `SOLR_TIMEOUT_SECS`: Request timeout in seconds
    /// - `SOLR_MAX_RETRIES`: Retries on connection failures
    /// - `SOLR_ACCEPT_INVALID_CERTS`: Accept self-signed certificates (default: only in local development)
    pub fn from_env() -> Result<Self, DeployerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DeployerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SOLR_BASE_URL").unwrap_or_else(|| DEFAULT_SOLR_BASE_URL.to_string());
        let core = lookup("SOLR_CORE").unwrap_or_else(|| DEFAULT_SOLR_CORE.to_string());

        let base_url = parse_url("SOLR_BASE_URL", &base_url)?;
        let mut target = DeploymentTarget::new(base_url, core);
        if let Some(upload) = lookup("SOLR_SCHEMA_UPLOAD_URL") {
            target = target.with_schema_upload_uri(parse_url("SOLR_SCHEMA_UPLOAD_URL", &upload)?);
        }

        let strategy_override = lookup("SOLR_DEPLOY_STRATEGY")
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<DeploymentStrategy>())
            .transpose()
            .map_err(|e| DeployerError::config(e.to_string()))?;

        let signals = EnvironmentSignals {
            managed_platform: lookup("SOLR_MANAGED_PLATFORM").is_some_and(|v| is_truthy(&v)),
            local_development: lookup("SOLR_LOCAL_DEVELOPMENT").is_some_and(|v| is_truthy(&v)),
            strategy_override,
        };

        let mut transport = TransportConfig::for_environment(&signals);
        if let Some(value) = lookup("SOLR_ACCEPT_INVALID_CERTS") {
            transport = transport.with_accept_invalid_certs(is_truthy(&value));
        }
        if let Some(secs) = lookup("SOLR_TIMEOUT_SECS") {
            let secs = parse_number::<u64>("SOLR_TIMEOUT_SECS", &secs)?;
            transport = transport.with_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = lookup("SOLR_MAX_RETRIES") {
            transport = transport.with_max_retries(parse_number("SOLR_MAX_RETRIES", &retries)?);
        }

        Ok(Self {
            target,
            config_dir: lookup("SOLR_CONFIG_DIR")
                .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string())
                .into(),
            archive_dir: lookup("SOLR_ARCHIVE_DIR").map(PathBuf::from),
            signals,
            transport,
        })
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, DeployerError> {
    Url::parse(value).map_err(|e| DeployerError::config(format!("{key} is not a valid URL: {e}")))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, DeployerError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DeployerError::config(format!("{key} is not a valid number: {e}")))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
