//! Interface definitions for the configset deployer's collaborators.
//!
//! This module defines the abstract `SolrTransport` and `ConfigFileProvider`
//! traits that allow for dependency injection and swappable implementations.

mod config_file_provider;
mod solr_transport;

pub use config_file_provider::ConfigFileProvider;
pub use solr_transport::{HttpMethod, HttpRequest, HttpResponse, SolrTransport};
