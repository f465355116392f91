use opds_availability::errors::{FormatError, RecordError};
use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unable to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("`{path}` is not a link fragment: {source}")]
    Link { path: PathBuf, source: FormatError },

    #[error("`{path}` is not JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("`{path}` does not contain a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("Record rejected: {0}")]
    Rejected(#[from] RecordError),

    #[error("Unable to install the log subscriber: {0}")]
    Tracing(Box<dyn std::error::Error + Send + Sync + 'static>),
}

pub(crate) fn read(path: &std::path::Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
