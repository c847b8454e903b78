//! # Configset Repository
//!
//! This crate provides traits and implementations for deploying a Solr
//! configset. It includes definitions for errors, the transport and file
//! provider interfaces, a directory-backed provider, and the Solr
//! implementation (transport, archive packaging, deployer and viewer).

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod providers;
pub mod solr;

pub use config::TransportConfig;
pub use errors::{ArchiveError, DeployError, ProviderError, TransportError};
pub use interfaces::{ConfigFileProvider, HttpMethod, HttpRequest, HttpResponse, SolrTransport};
pub use providers::DirectoryConfigProvider;
pub use solr::{ArchiveBuilder, ReqwestTransport, SchemaDeployer, SchemaViewer};
