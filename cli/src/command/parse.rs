use crate::errors::{CliError, CliResult, read};
use clap::Args;
use opds_availability::Availability;
use opds_availability::parser::ParseSettings;
use opds_availability::xml::{XmlElement, XmlNode};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ParseCommand {
    /// A file containing a single OPDS acquisition `<link>` element
    pub link_path: PathBuf,

    /// Keep available copies greater than the total as-is
    #[arg(long)]
    no_clamp: bool,

    /// Do not infer a limited state from zero available copies
    #[arg(long)]
    no_infer: bool,

    /// Also print the persisted record as JSON
    #[arg(long)]
    record: bool,
}

impl ParseCommand {
    pub fn parse(&self) -> CliResult<()> {
        let availability = self.availability()?;
        println!("{availability:#?}");

        if self.record {
            println!("{:#}", Value::Object(availability.to_record()));
        }
        Ok(())
    }

    pub fn availability(&self) -> CliResult<Availability> {
        let xml = read(&self.link_path)?;
        let link = XmlElement::parse(&xml).map_err(|source| CliError::Link {
            path: self.link_path.clone(),
            source,
        })?;
        tracing::debug!(
            path = %self.link_path.display(),
            element = link.name(),
            "parsed link fragment"
        );

        Ok(Availability::from_link_with(&link, self.settings()))
    }

    pub fn settings(&self) -> ParseSettings {
        ParseSettings::builder()
            .clamp_copies(!self.no_clamp)
            .infer_from_counts(!self.no_infer)
            .build()
    }
}
