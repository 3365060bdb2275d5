use std::process::ExitCode;

use clap::Parser;
use soulmint_scripts::{cli::Cli, commands::run, constants::DEFAULT_LOG_DIRECTIVE};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, stdout only carries the deployed address
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli, &mut std::io::stdout(), &mut std::io::stderr()).await
}
