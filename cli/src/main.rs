use clap::Parser;
use opds_availability_cli::command::Commands;
use opds_availability_cli::errors::CliResult;
use opds_availability_cli::{Cli, init_tracing};

fn main() -> CliResult<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.commands {
        Commands::Parse(parse) => parse.parse()?,
        Commands::Decode(decode) => decode.decode()?,
    }

    Ok(())
}
