//! Execution of CLI commands.

use serde_json::json;
use tracing::{error, info};

use crate::cli::Command;
use crate::config::Dependencies;
use crate::DeployerError;

/// What a command prints and whether the process should exit successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn new(text: impl Into<String>, success: bool) -> Self {
        Self {
            text: text.into(),
            success,
        }
    }
}

/// Run `command` against the wired dependencies.
///
/// Hard failures (missing server configuration, no response from Solr) are
/// returned as errors. A deployment the core rejected is a normal output with
/// `success == false`.
pub async fn execute(
    command: &Command,
    deps: &Dependencies,
    json: bool,
) -> Result<CommandOutput, DeployerError> {
    match command {
        Command::Deploy { server_id } => {
            let result = deps.deployer.deploy(server_id).await?;
            let text = if json {
                serde_json::to_string_pretty(&result)?
            } else {
                result.summary()
            };
            Ok(CommandOutput::new(text, result.is_success()))
        }

        Command::UploadSequential { server_id } => {
            let files = deps.provider.get_files(server_id).await?;
            let attempts = deps.deployer.upload_sequential(&files).await;
            let success = attempts.iter().all(|a| a.success);

            info!(
                server_id = %server_id,
                files = attempts.len(),
                failed = attempts.iter().filter(|a| !a.success).count(),
                "Sequential upload finished"
            );

            let text = if json {
                serde_json::to_string_pretty(&attempts)?
            } else {
                attempts
                    .iter()
                    .map(|a| format!("File {}: {}", a.label, a.message()))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            Ok(CommandOutput::new(text, success))
        }

        Command::View { file } => match deps.viewer.view(file).await {
            Some(content) => Ok(CommandOutput::new(content, true)),
            None => Ok(CommandOutput::new(
                format!("Could not fetch {file} from the core"),
                false,
            )),
        },

        Command::Verify { server_id, file } => {
            let files = deps.provider.get_files(server_id).await?;
            let matches = deps.viewer.verify(&files, file).await;
            if !matches {
                error!(server_id = %server_id, file = %file, "Verification failed");
            }

            let text = if json {
                serde_json::to_string_pretty(&json!({
                    "server_id": server_id,
                    "file": file,
                    "matches": matches,
                }))?
            } else if matches {
                format!("{file}: deployed copy matches {server_id}")
            } else {
                format!("{file}: deployed copy does not match {server_id}")
            };
            Ok(CommandOutput::new(text, matches))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeployerSettings;
    use async_trait::async_trait;
    use configset_repository::{HttpRequest, HttpResponse, SolrTransport, TransportError};
    use std::collections::HashMap;
    use std::fs;
    use std::sync::{Arc, Mutex};

    /// Mock transport that serves `schema.xml` reads and accepts uploads.
    struct MockTransport {
        upload_status: u16,
        deployed_schema: String,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        fn new(upload_status: u16, deployed_schema: &str) -> Self {
            Self {
                upload_status,
                deployed_schema: deployed_schema.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SolrTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let is_view = request.query_param("action").as_deref() == Some("VIEW");
            self.requests.lock().unwrap().push(request);
            if is_view {
                Ok(HttpResponse::new(200, "OK", self.deployed_schema.clone()))
            } else {
                Ok(HttpResponse::new(self.upload_status, "Status", Vec::new()))
            }
        }
    }

    fn fixture(vars: &[(&str, &str)], transport: Arc<MockTransport>) -> (tempfile::TempDir, Dependencies) {
        let root = tempfile::tempdir().unwrap();
        let server = root.path().join("default");
        fs::create_dir(&server).unwrap();
        fs::write(server.join("schema.xml"), "<schema/>").unwrap();
        fs::write(server.join("stopwords.txt"), "the").unwrap();

        let mut vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.insert(
            "SOLR_CONFIG_DIR".to_string(),
            root.path().display().to_string(),
        );
        let settings = DeployerSettings::from_lookup(|key| vars.get(key).cloned()).unwrap();

        (root, Dependencies::with_transport(settings, transport))
    }

    #[tokio::test]
    async fn test_deploy_managed() {
        let transport = Arc::new(MockTransport::new(200, ""));
        let (_root, deps) = fixture(&[("SOLR_MANAGED_PLATFORM", "1")], transport.clone());

        let command = Command::Deploy {
            server_id: "default".to_string(),
        };
        let output = execute(&command, &deps, false).await.unwrap();

        assert!(output.success);
        assert_eq!(output.text, "Result: UPLOADED Status code: 200 - Status");
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deploy_rejected_is_unsuccessful_output() {
        let transport = Arc::new(MockTransport::new(500, ""));
        let (_root, deps) = fixture(&[("SOLR_LOCAL_DEVELOPMENT", "1")], transport);

        let command = Command::Deploy {
            server_id: "default".to_string(),
        };
        let output = execute(&command, &deps, true).await.unwrap();

        assert!(!output.success);
        let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
        assert_eq!(parsed["strategy"], "zip_archive");
        assert_eq!(parsed["attempts"][0]["status"], 500);
    }

    #[tokio::test]
    async fn test_deploy_unknown_server_is_error() {
        let transport = Arc::new(MockTransport::new(200, ""));
        let (_root, deps) = fixture(&[("SOLR_MANAGED_PLATFORM", "1")], transport.clone());

        let command = Command::Deploy {
            server_id: "other".to_string(),
        };
        let result = execute(&command, &deps, false).await;

        assert!(matches!(result, Err(DeployerError::DeployError(_))));
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_sequential_lists_each_file() {
        let transport = Arc::new(MockTransport::new(200, ""));
        let (_root, deps) = fixture(&[], transport.clone());

        let command = Command::UploadSequential {
            server_id: "default".to_string(),
        };
        let output = execute(&command, &deps, false).await.unwrap();

        assert!(output.success);
        assert_eq!(
            output.text,
            "File schema.xml: Result: UPLOADED Status code: 200 - Status\n\
             File stopwords.txt: Result: UPLOADED Status code: 200 - Status"
        );
        assert_eq!(transport.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_view_and_verify() {
        let transport = Arc::new(MockTransport::new(200, "<schema/>"));
        let (_root, deps) = fixture(&[], transport);

        let view = Command::View {
            file: "schema.xml".to_string(),
        };
        let output = execute(&view, &deps, false).await.unwrap();
        assert_eq!(output, CommandOutput::new("<schema/>", true));

        let verify = Command::Verify {
            server_id: "default".to_string(),
            file: "schema.xml".to_string(),
        };
        let output = execute(&verify, &deps, false).await.unwrap();
        assert!(output.success);
    }

    #[tokio::test]
    async fn test_verify_detects_drift() {
        let transport = Arc::new(MockTransport::new(200, "<schema version=\"old\"/>"));
        let (_root, deps) = fixture(&[], transport);

        let verify = Command::Verify {
            server_id: "default".to_string(),
            file: "schema.xml".to_string(),
        };
        let output = execute(&verify, &deps, false).await.unwrap();

        assert!(!output.success);
        assert_eq!(output.text, "schema.xml: deployed copy does not match default");
    }
}
