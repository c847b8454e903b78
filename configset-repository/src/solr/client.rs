//! `reqwest` implementation of the Solr transport.
//!
//! This module provides the concrete implementation of `SolrTransport`
//! used by the deployer binary.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::TransportConfig;
use crate::errors::TransportError;
use crate::interfaces::{HttpMethod, HttpRequest, HttpResponse, SolrTransport};

/// HTTP transport backed by a pooled `reqwest::Client`.
///
/// Connection failures and timeouts are retried with exponential backoff up to
/// `TransportConfig::max_retries` times. Responses are never retried,
/// whatever their status.
///
/// # Example
///
/// ```ignore
/// let transport = ReqwestTransport::new(TransportConfig::default())?;
/// let url = Url::parse("http://localhost:8983/solr/search/admin/ping")?;
/// let response = transport.send(HttpRequest::get(url)).await?;
/// println!("{} {}", response.status, response.reason);
/// ```
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    /// Create a transport with the given configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(ReqwestTransport)` - A new transport instance
    /// * `Err(TransportError::InvalidRequest)` - If the HTTP client cannot be built
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::invalid_request(e.to_string()))?;

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for the Solr transport");
        }

        info!(
            timeout_secs = config.timeout.as_secs(),
            max_retries = config.max_retries,
            accept_invalid_certs = config.accept_invalid_certs,
            "Created Solr HTTP transport"
        );

        Ok(Self { client, config })
    }

    fn build_request(&self, request: &HttpRequest) -> Result<reqwest::Request, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        builder
            .build()
            .map_err(|e| TransportError::invalid_request(e.to_string()))
    }

    async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let built = self.build_request(request)?;
        let response = self.client.execute(built).await?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.bytes().await?.to_vec();

        debug!(
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            bytes = body.len(),
            "Received Solr response"
        );

        Ok(HttpResponse::new(status.as_u16(), reason, body))
    }
}

#[async_trait]
impl SolrTransport for ReqwestTransport {
    /// Send a request, retrying connection-level failures with exponential backoff.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut delay_ms = self.config.initial_retry_delay_ms;
        let mut attempt = 0;

        loop {
            match self.send_once(&request).await {
                Ok(response) => {
                    if attempt > 0 {
                        info!(
                            attempt = attempt,
                            url = %request.url,
                            "Solr request succeeded after retry"
                        );
                    }
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Solr request failed, retrying"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms = std::cmp::min(delay_ms * 2, self.config.max_retry_delay_ms);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_build_request() {
        let transport = ReqwestTransport::new(TransportConfig::default()).unwrap();
        let url = Url::parse("http://localhost:8983/solr/search/schema/upload").unwrap();
        let request = HttpRequest::post(url)
            .with_query("action", "UPLOAD")
            .with_header("Content-Type", "application/json")
            .with_body(b"{}".to_vec());

        let built = transport.build_request(&request).unwrap();

        assert_eq!(built.method(), &reqwest::Method::POST);
        assert_eq!(
            built.url().as_str(),
            "http://localhost:8983/solr/search/schema/upload?action=UPLOAD"
        );
        assert_eq!(
            built.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(
            built.body().and_then(|b| b.as_bytes()),
            Some(&b"{}"[..])
        );
    }

    #[test]
    fn test_build_request_without_body() {
        let transport = ReqwestTransport::new(TransportConfig::default()).unwrap();
        let url = Url::parse("http://localhost:8983/solr/search/admin/file").unwrap();

        let built = transport.build_request(&HttpRequest::get(url)).unwrap();

        assert_eq!(built.method(), &reqwest::Method::GET);
        assert!(built.body().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let transport =
            ReqwestTransport::new(TransportConfig::default().without_retries()).unwrap();
        let url = Url::parse("http://127.0.0.1:1/solr").unwrap();

        let result = transport.send(HttpRequest::get(url)).await;

        assert!(matches!(result, Err(TransportError::ConnectionError(_))));
    }
}
