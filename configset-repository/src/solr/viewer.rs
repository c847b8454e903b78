//! Read-back of deployed configuration files.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use crate::interfaces::SolrTransport;
use crate::solr::requests;
use configset_shared::{ConfigFileSet, DeploymentTarget};

/// File fetched by `view_schema`.
pub const DEFAULT_SCHEMA_FILE: &str = "schema.xml";

/// Fetches the files currently deployed on a core.
///
/// This is a best-effort diagnostic read: every failure is logged and turned
/// into `None`, nothing is ever returned as an error.
pub struct SchemaViewer {
    transport: Arc<dyn SolrTransport>,
    target: DeploymentTarget,
}

impl SchemaViewer {
    pub fn new(transport: Arc<dyn SolrTransport>, target: DeploymentTarget) -> Self {
        Self { transport, target }
    }

    /// Content of `filename` as deployed on the core, if it can be fetched.
    #[instrument(skip(self), fields(core = %self.target.core()))]
    pub async fn view(&self, filename: &str) -> Option<String> {
        let request = requests::view_file_request(&self.target, filename);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(filename = %filename, error = %e, "Failed to fetch deployed file");
                return None;
            }
        };

        if !response.is_2xx() {
            error!(
                filename = %filename,
                status = response.status,
                reason = %response.reason,
                "Solr refused to return deployed file"
            );
            return None;
        }

        match String::from_utf8(response.body) {
            Ok(content) => {
                debug!(filename = %filename, bytes = content.len(), "Fetched deployed file");
                Some(content)
            }
            Err(e) => {
                error!(filename = %filename, error = %e, "Deployed file is not valid UTF-8");
                None
            }
        }
    }

    /// The deployed `schema.xml`.
    pub async fn view_schema(&self) -> Option<String> {
        self.view(DEFAULT_SCHEMA_FILE).await
    }

    /// Whether the deployed `filename` matches the local copy in `files`.
    ///
    /// False when the file is missing locally, cannot be fetched, or differs.
    pub async fn verify(&self, files: &ConfigFileSet, filename: &str) -> bool {
        let Some(expected) = files.get(filename) else {
            warn!(filename = %filename, "File is not part of the local configset");
            return false;
        };

        match self.view(filename).await {
            Some(deployed) if deployed.as_bytes() == expected => {
                debug!(filename = %filename, "Deployed file matches local copy");
                true
            }
            Some(_) => {
                warn!(filename = %filename, "Deployed file differs from local copy");
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;
    use crate::interfaces::{HttpMethod, HttpRequest, HttpResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock transport answering every request with the same outcome.
    struct MockTransport {
        outcome: Result<HttpResponse, TransportError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        fn new(outcome: Result<HttpResponse, TransportError>) -> Self {
            Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SolrTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.outcome.clone()
        }
    }

    fn viewer(transport: Arc<MockTransport>) -> SchemaViewer {
        let target = DeploymentTarget::parse("http://localhost:8983/solr", "search").unwrap();
        SchemaViewer::new(transport, target)
    }

    #[tokio::test]
    async fn test_view_schema_returns_content() {
        let transport = Arc::new(MockTransport::new(Ok(HttpResponse::new(
            200,
            "OK",
            "<schema/>",
        ))));
        let viewer = viewer(transport.clone());

        assert_eq!(viewer.view_schema().await, Some("<schema/>".to_string()));

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(
            requests[0].url.as_str(),
            "http://localhost:8983/solr/search/admin/file?action=VIEW&file=schema.xml"
        );
    }

    #[tokio::test]
    async fn test_view_swallows_transport_error() {
        let transport = Arc::new(MockTransport::new(Err(TransportError::connection(
            "connection refused",
        ))));

        assert_eq!(viewer(transport).view("schema.xml").await, None);
    }

    #[tokio::test]
    async fn test_view_non_success_is_none() {
        let transport = Arc::new(MockTransport::new(Ok(HttpResponse::new(
            404,
            "Not Found",
            "no such file",
        ))));

        assert_eq!(viewer(transport).view("missing.xml").await, None);
    }

    #[tokio::test]
    async fn test_view_invalid_utf8_is_none() {
        let transport = Arc::new(MockTransport::new(Ok(HttpResponse::new(
            200,
            "OK",
            vec![0xff, 0xfe],
        ))));

        assert_eq!(viewer(transport).view("binary.bin").await, None);
    }

    #[tokio::test]
    async fn test_verify() {
        let files = ConfigFileSet::new().with_file("schema.xml", "<schema/>").unwrap();

        let matching = Arc::new(MockTransport::new(Ok(HttpResponse::new(
            200,
            "OK",
            "<schema/>",
        ))));
        assert!(viewer(matching).verify(&files, "schema.xml").await);

        let differing = Arc::new(MockTransport::new(Ok(HttpResponse::new(
            200,
            "OK",
            "<schema version=\"2\"/>",
        ))));
        assert!(!viewer(differing).verify(&files, "schema.xml").await);

        let unused = Arc::new(MockTransport::new(Ok(HttpResponse::new(200, "OK", ""))));
        assert!(!viewer(unused.clone()).verify(&files, "solrconfig.xml").await);
        assert!(unused.requests.lock().unwrap().is_empty());
    }
}
