use crate::errors::{CliError, CliResult, read};
use clap::Args;
use opds_availability::Availability;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// A file containing one persisted availability record as a JSON object
    pub record_path: PathBuf,
}

impl DecodeCommand {
    pub fn decode(&self) -> CliResult<()> {
        let availability = self.availability()?;
        println!("{availability:#?}");
        Ok(())
    }

    pub fn availability(&self) -> CliResult<Availability> {
        let json = read(&self.record_path)?;
        let value = serde_json::from_str(&json).map_err(|source| CliError::Json {
            path: self.record_path.clone(),
            source,
        })?;

        match value {
            Value::Object(record) => Ok(Availability::try_from_record(&record)?),
            _ => Err(CliError::NotAnObject {
                path: self.record_path.clone(),
            }),
        }
    }
}
