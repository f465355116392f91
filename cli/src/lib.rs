use crate::errors::{CliError, CliResult};
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod command;
pub mod errors;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub commands: command::Commands,
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> CliResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(CliError::Tracing)
}
