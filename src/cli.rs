// Command-line surface for the `bio-record` binary

use crate::birth_date;
use crate::record::{RawRecord, RecordSummary};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bio-record", version, about = "Validate and display a biographical record")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Defaults to the interactive form
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate the given fields and print the record
    Show(ShowArgs),
    /// Fill in a record interactively
    Form,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ShowArgs {
    /// Identifier, e.g. 13-8994
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long = "dob", value_name = "DD/MM/YYYY")]
    pub date_of_birth: Option<String>,

    /// CSEN or DMET, any case
    #[arg(long)]
    pub major: Option<String>,

    /// Reference date for the age (defaults to today)
    #[arg(long, value_name = "DD/MM/YYYY", value_parser = birth_date::parse)]
    pub today: Option<NaiveDate>,

    #[arg(long, value_enum, env = "BIO_RECORD_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ShowArgs {
    pub fn raw_record(&self) -> RawRecord {
        RawRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            major: self.major.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render_summary(summary: &RecordSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => {
            let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

            let lines = [
                ("Id", or_dash(&summary.id)),
                ("Name", or_dash(&summary.name)),
                ("First name", or_dash(summary.first_name.as_deref().unwrap_or(""))),
                (
                    "Date of birth",
                    or_dash(summary.formatted_date_of_birth.as_deref().unwrap_or("")),
                ),
                (
                    "Age",
                    summary.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
                ),
                ("Major", or_dash(&summary.major)),
            ];

            Ok(lines
                .iter()
                .map(|(label, value)| format!("{:<14} {}", format!("{}:", label), value))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
