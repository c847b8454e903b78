//! Solr implementation of the configset deployer.
//!
//! This module provides the `reqwest` transport, archive packaging, the
//! deployer itself and the read-back viewer.

mod archive;
mod client;
mod deployer;
mod requests;
mod viewer;

pub use archive::{ArchiveBuilder, TemporaryArchive};
pub use client::ReqwestTransport;
pub use deployer::SchemaDeployer;
pub use requests::{infer_content_type, is_batch_success, is_file_success, CONFIGSET_NAME};
pub use viewer::{SchemaViewer, DEFAULT_SCHEMA_FILE};
