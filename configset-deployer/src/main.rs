//! Configset Deployer Main Entry Point
//!
//! Pushes a server's Solr configset to the configured core, or reads back
//! what is currently deployed.

use std::env;
use std::process::ExitCode;

use clap::Parser;
use configset_deployer::cli::Cli;
use configset_deployer::{execute, Dependencies, DeployerError};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging. Logs go to stderr so stdout only carries
/// command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("configset_deployer=info,configset_repository=info")
    });

    let json_logs = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    info!(
        service_name = "configset-deployer",
        service_version = env!("CARGO_PKG_VERSION"),
        json = json_logs,
        "Tracing initialized"
    );
}

async fn run(cli: Cli) -> Result<bool, DeployerError> {
    let deps = Dependencies::new()?;
    let output = execute(&cli.command, &deps, cli.json).await?;

    if !output.text.is_empty() {
        println!("{}", output.text);
    }

    Ok(output.success)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Configset deployer failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
