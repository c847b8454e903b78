//! Command-line interface definition.

use clap::{Parser, Subcommand};

use configset_repository::solr::DEFAULT_SCHEMA_FILE;

#[derive(Debug, Parser)]
#[command(name = "configset-deployer")]
#[command(about = "Deploy Solr configsets to a managed or local core", long_about = None)]
pub struct Cli {
    /// Print the deployment result as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy a server's configset with the strategy selected by the environment
    Deploy {
        /// Server configuration id (directory name under SOLR_CONFIG_DIR)
        server_id: String,
    },

    /// Upload a server's files one request per file
    UploadSequential {
        /// Server configuration id (directory name under SOLR_CONFIG_DIR)
        server_id: String,
    },

    /// Print a file as currently deployed on the core
    View {
        /// File to fetch
        #[arg(long, default_value = DEFAULT_SCHEMA_FILE)]
        file: String,
    },

    /// Compare a deployed file with the local copy
    Verify {
        /// Server configuration id (directory name under SOLR_CONFIG_DIR)
        server_id: String,

        /// File to compare
        #[arg(long, default_value = DEFAULT_SCHEMA_FILE)]
        file: String,
    },
}
