use clap::Subcommand;

mod decode;
mod parse;

pub use decode::DecodeCommand;
pub use parse::ParseCommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive the availability of an acquisition link fragment.
    Parse(ParseCommand),
    /// Read back a persisted availability record.
    Decode(DecodeCommand),
}
