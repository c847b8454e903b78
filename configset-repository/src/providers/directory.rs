//! Directory-backed config file provider.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::errors::ProviderError;
use crate::interfaces::ConfigFileProvider;
use configset_shared::ConfigFileSet;

/// Serves each server configuration from `<root>/<server_id>/`.
///
/// Only regular files directly inside the server directory are included;
/// subdirectories are skipped.
#[derive(Debug, Clone)]
pub struct DirectoryConfigProvider {
    root: PathBuf,
}

impl DirectoryConfigProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory for `server_id`, or `None` if the id is not a single plain
    /// path component.
    fn server_dir(&self, server_id: &str) -> Option<PathBuf> {
        let mut components = Path::new(server_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }
}

#[async_trait]
impl ConfigFileProvider for DirectoryConfigProvider {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn get_files(&self, server_id: &str) -> Result<ConfigFileSet, ProviderError> {
        let dir = self
            .server_dir(server_id)
            .ok_or_else(|| ProviderError::server_not_found(server_id))?;

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProviderError::server_not_found(server_id));
            }
            Err(e) => {
                return Err(ProviderError::config_retrieval(format!(
                    "Failed to read {}: {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut files = ConfigFileSet::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| {
                ProviderError::config_retrieval(format!("Failed to list {}: {}", dir.display(), e))
            })?;
            let Some(entry) = entry else {
                break;
            };

            let path = entry.path();
            let file_type = entry.file_type().await.map_err(|e| {
                ProviderError::config_retrieval(format!("Failed to stat {}: {}", path.display(), e))
            })?;
            if !file_type.is_file() {
                debug!(path = %path.display(), "Skipping non-file entry");
                continue;
            }

            let Some(filename) = entry.file_name().to_str().map(str::to_owned) else {
                return Err(ProviderError::config_retrieval(format!(
                    "File name is not valid UTF-8: {}",
                    path.display()
                )));
            };

            let content = tokio::fs::read(&path).await.map_err(|e| {
                ProviderError::config_retrieval(format!("Failed to read {}: {}", path.display(), e))
            })?;

            files
                .insert(filename, content)
                .map_err(|e| ProviderError::config_retrieval(e.to_string()))?;
        }

        if files.is_empty() {
            return Err(ProviderError::config_retrieval(format!(
                "No config files in {}",
                dir.display()
            )));
        }

        debug!(server_id = %server_id, files = files.len(), "Loaded config files");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_get_files_reads_server_directory() {
        let root = tempfile::tempdir().unwrap();
        let server = root.path().join("default");
        fs::create_dir(&server).unwrap();
        fs::write(server.join("schema.xml"), "<schema/>").unwrap();
        fs::write(server.join("solrconfig.xml"), "<config/>").unwrap();
        fs::create_dir(server.join("lang")).unwrap();
        fs::write(server.join("lang").join("stopwords_en.txt"), "the").unwrap();

        let provider = DirectoryConfigProvider::new(root.path());
        let files = provider.get_files("default").await.unwrap();

        let names: Vec<&str> = files.filenames().collect();
        assert_eq!(names, vec!["schema.xml", "solrconfig.xml"]);
        assert_eq!(files.get("schema.xml"), Some(&b"<schema/>"[..]));
    }

    #[tokio::test]
    async fn test_missing_server_is_not_found() {
        let root = tempfile::tempdir().unwrap();
        let provider = DirectoryConfigProvider::new(root.path());

        let result = provider.get_files("unknown").await;

        assert_eq!(result, Err(ProviderError::server_not_found("unknown")));
    }

    #[tokio::test]
    async fn test_path_like_server_ids_are_rejected() {
        let root = tempfile::tempdir().unwrap();
        let provider = DirectoryConfigProvider::new(root.path().join("servers"));

        for server_id in ["..", "../servers", "a/b", "/etc", ""] {
            let result = provider.get_files(server_id).await;
            assert!(
                matches!(result, Err(ProviderError::ServerNotFound(_))),
                "{server_id:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_server_directory_is_retrieval_error() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("empty")).unwrap();
        let provider = DirectoryConfigProvider::new(root.path());

        let result = provider.get_files("empty").await;

        assert!(matches!(result, Err(ProviderError::ConfigRetrievalError(_))));
    }
}
