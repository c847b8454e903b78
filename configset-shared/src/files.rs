//! The set of configuration files pushed to a Solr core.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while assembling a [`ConfigFileSet`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigFileError {
    /// A file was added without a name.
    #[error("Config file name must not be empty")]
    EmptyFilename,
}

/// Mapping of filename to raw file content.
///
/// Filenames are unique and non-empty. Iteration is ordered by filename so
/// that every request built from the same set is byte-for-byte identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFileSet {
    files: BTreeMap<String, Vec<u8>>,
}

impl ConfigFileSet {
    /// Create an empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    ///
    /// Returns the previous content when the filename was already present.
    pub fn insert(
        &mut self,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Result<Option<Vec<u8>>, ConfigFileError> {
        let filename = filename.into();
        if filename.is_empty() {
            return Err(ConfigFileError::EmptyFilename);
        }
        Ok(self.files.insert(filename, content.into()))
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_file(
        mut self,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Result<Self, ConfigFileError> {
        self.insert(filename, content)?;
        Ok(self)
    }

    /// Content of a single file.
    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.files.get(filename).map(Vec::as_slice)
    }

    /// Iterate files in filename order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_slice()))
    }

    /// Filenames in iteration order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_empty_filename() {
        let mut files = ConfigFileSet::new();
        assert_eq!(
            files.insert("", b"content".to_vec()),
            Err(ConfigFileError::EmptyFilename)
        );
        assert!(files.is_empty());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut files = ConfigFileSet::new();
        assert_eq!(files.insert("schema.xml", "<a/>"), Ok(None));
        assert_eq!(
            files.insert("schema.xml", "<b/>"),
            Ok(Some(b"<a/>".to_vec()))
        );
        assert_eq!(files.len(), 1);
        assert_eq!(files.get("schema.xml"), Some(&b"<b/>"[..]));
    }

    #[test]
    fn test_iteration_is_ordered_by_filename() {
        let files = ConfigFileSet::new()
            .with_file("solrconfig.xml", "<config/>")
            .unwrap()
            .with_file("elevate.xml", "<elevate/>")
            .unwrap()
            .with_file("schema.xml", "<schema/>")
            .unwrap();

        let names: Vec<&str> = files.filenames().collect();
        assert_eq!(names, vec!["elevate.xml", "schema.xml", "solrconfig.xml"]);
    }
}
