mod config_cmd;
mod data;
mod log;
mod med;
mod share;
mod visit;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use data::{ExportCommand, ImportCommand};
pub use log::LogCommand;
pub use med::MedCommand;
pub use share::ShareCommand;
pub use visit::VisitCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Validates a `YYYY-MM-DD` argument, defaulting to today.
pub(crate) fn date_or_today(date: &Option<String>) -> Result<String, String> {
    match date {
        Some(d) => parse_date(d).map(|_| d.clone()),
        None => Ok(Local::now().date_naive().format("%Y-%m-%d").to_string()),
    }
}

pub(crate) fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", date))
}
