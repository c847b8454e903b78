//! Configuration types for the Solr HTTP transport.

use std::time::Duration;

use configset_shared::{DeploymentStrategy, EnvironmentSignals};

/// Configuration for `ReqwestTransport`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total time allowed for one request, including the body upload.
    pub timeout: Duration,
    /// Time allowed to establish the connection.
    pub connect_timeout: Duration,
    /// Retries after a connection failure or timeout. HTTP error statuses are
    /// never retried.
    pub max_retries: u32,
    /// Initial retry delay in milliseconds.
    pub initial_retry_delay_ms: u64,
    /// Maximum retry delay in milliseconds.
    pub max_retry_delay_ms: u64,
    /// Accept self-signed certificates. Only meant for local containers.
    pub accept_invalid_certs: bool,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: 2,
            initial_retry_delay_ms: 100,
            max_retry_delay_ms: 2000,
            accept_invalid_certs: false,
            user_agent: concat!("configset-deployer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportConfig {
    /// Transport settings suited to the execution environment.
    ///
    /// The managed platform gets a longer timeout for the multi-file payload.
    /// Self-signed certificates are accepted only when the local development
    /// signal is set and the managed platform signal is not; a strategy
    /// override never relaxes certificate checks.
    pub fn for_environment(signals: &EnvironmentSignals) -> Self {
        let timeout = match signals.resolve() {
            Some(DeploymentStrategy::DirectMultiFile) => Duration::from_secs(60),
            _ => Self::default().timeout,
        };
        Self {
            timeout,
            accept_invalid_certs: signals.local_development && !signals.managed_platform,
            ..Self::default()
        }
    }

    /// Disable retries.
    pub fn without_retries(mut self) -> Self {
        self.max_retries = 0;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accept or reject self-signed certificates.
    pub fn with_accept_invalid_certs(mut self, accept_invalid_certs: bool) -> Self {
        self.accept_invalid_certs = accept_invalid_certs;
        self
    }

    /// Set the number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(managed: bool, local: bool, strategy: Option<DeploymentStrategy>) -> EnvironmentSignals {
        EnvironmentSignals {
            managed_platform: managed,
            local_development: local,
            strategy_override: strategy,
        }
    }

    #[test]
    fn test_for_environment() {
        let managed = TransportConfig::for_environment(&signals(true, false, None));
        assert_eq!(managed.timeout, Duration::from_secs(60));
        assert!(!managed.accept_invalid_certs);

        let local = TransportConfig::for_environment(&signals(false, true, None));
        assert!(local.accept_invalid_certs);

        let both = TransportConfig::for_environment(&signals(true, true, None));
        assert!(!both.accept_invalid_certs);

        let none = TransportConfig::for_environment(&signals(false, false, None));
        assert_eq!(none.max_retries, TransportConfig::default().max_retries);
        assert!(!none.accept_invalid_certs);
    }

    #[test]
    fn test_zip_override_keeps_certificate_checks() {
        let config = TransportConfig::for_environment(&signals(
            false,
            false,
            Some(DeploymentStrategy::ZipArchive),
        ));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_without_retries() {
        let config = TransportConfig::default().with_max_retries(5).without_retries();
        assert_eq!(config.max_retries, 0);
    }
}
