//! Addressing of the remote Solr core that receives a configset.

use url::Url;

/// Identifies the remote core a configset is deployed to.
///
/// `base_uri` is the Solr root (e.g. `http://localhost:8983/solr`). All other
/// endpoints are derived from it unless set explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    base_uri: Url,
    core: String,
    schema_upload_uri: Url,
}

impl DeploymentTarget {
    /// Create a target for `core` under `base_uri`.
    ///
    /// The schema upload endpoint defaults to `<base_uri>/<core>/schema/upload`.
    pub fn new(base_uri: Url, core: impl Into<String>) -> Self {
        let core = core.into();
        let schema_upload_uri = push_segments(&base_uri, &[core.as_str(), "schema", "upload"]);
        Self {
            base_uri,
            core,
            schema_upload_uri,
        }
    }

    /// Parse `base_uri` and create a target for `core`.
    pub fn parse(base_uri: &str, core: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(base_uri)?, core))
    }

    /// Override the schema upload endpoint.
    pub fn with_schema_upload_uri(mut self, schema_upload_uri: Url) -> Self {
        self.schema_upload_uri = schema_upload_uri;
        self
    }

    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    pub fn core(&self) -> &str {
        &self.core
    }

    pub fn schema_upload_uri(&self) -> &Url {
        &self.schema_upload_uri
    }

    /// `<base_uri>/<core>`
    pub fn core_base_uri(&self) -> Url {
        push_segments(&self.base_uri, &[self.core.as_str()])
    }

    /// `<base_uri>/api/core/configs/_default`
    pub fn configset_upload_uri(&self) -> Url {
        push_segments(&self.base_uri, &["api", "core", "configs", "_default"])
    }

    /// `<base_uri>/<core>/admin/file`
    pub fn file_view_uri(&self) -> Url {
        push_segments(&self.base_uri, &[self.core.as_str(), "admin", "file"])
    }
}

fn push_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Only cannot-be-a-base URLs (e.g. `mailto:`) refuse path segments.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_uris() {
        let target = DeploymentTarget::parse("http://localhost:8983/solr", "search").unwrap();

        assert_eq!(target.core(), "search");
        assert_eq!(
            target.core_base_uri().as_str(),
            "http://localhost:8983/solr/search"
        );
        assert_eq!(
            target.schema_upload_uri().as_str(),
            "http://localhost:8983/solr/search/schema/upload"
        );
        assert_eq!(
            target.configset_upload_uri().as_str(),
            "http://localhost:8983/solr/api/core/configs/_default"
        );
        assert_eq!(
            target.file_view_uri().as_str(),
            "http://localhost:8983/solr/search/admin/file"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let target = DeploymentTarget::parse("https://solr.example.com/solr/", "main").unwrap();
        assert_eq!(
            target.core_base_uri().as_str(),
            "https://solr.example.com/solr/main"
        );
    }

    #[test]
    fn test_schema_upload_override() {
        let upload = Url::parse("https://platform.example.com/v1/schema").unwrap();
        let target = DeploymentTarget::parse("http://localhost:8983/solr", "search")
            .unwrap()
            .with_schema_upload_uri(upload.clone());
        assert_eq!(target.schema_upload_uri(), &upload);
    }
}
