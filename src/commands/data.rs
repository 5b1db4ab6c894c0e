use clap::Args;
use healthlog_core::{ImportFormat, Interchange, KeyValueStore, Store};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args)]
pub struct ExportCommand {
    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Indent the JSON
    #[arg(long)]
    pretty: bool,
}

impl ExportCommand {
    pub fn run<S: KeyValueStore>(&self, store: &Store<S>) -> Result<(), Box<dyn std::error::Error>> {
        let json = Interchange::new(store).export_all(self.pretty)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &json)
                    .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
                eprintln!("Exported to {}", path.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ImportCommand {
    /// File to read; stdin when omitted or "-"
    file: Option<PathBuf>,
}

impl ImportCommand {
    pub fn run<S: KeyValueStore>(&self, store: &Store<S>) -> Result<(), Box<dyn std::error::Error>> {
        let text = self.read_input()?;
        let report = Interchange::new(store).import(&text)?;

        match report.format {
            ImportFormat::Envelope => println!("Imported export data:"),
            ImportFormat::ShareText => println!("Imported share report:"),
        }
        if let Some(days) = report.logs_replaced {
            println!("  Logs replaced: {} days", days);
        }
        if report.days_merged > 0 {
            println!(
                "  Logs merged: {} entries across {} days",
                report.entries_imported, report.days_merged
            );
        }
        if let Some(count) = report.medications_replaced {
            println!("  Medications replaced: {}", count);
        }
        if let Some(count) = report.doctor_visits_replaced {
            println!("  Doctor visits replaced: {}", count);
        }
        for date in &report.skipped_dates {
            eprintln!("Skipped day with unreadable date: {}", date);
        }
        Ok(())
    }

    fn read_input(&self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e).into()),
            _ => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}
