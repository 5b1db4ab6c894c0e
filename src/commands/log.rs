use clap::{Args, Subcommand};
use healthlog_core::{KeyValueStore, LogEntry, LogType, Store};

use super::{date_or_today, OutputFormat};

#[derive(Args)]
pub struct LogCommand {
    #[command(subcommand)]
    pub command: LogSubcommand,
}

#[derive(Subcommand)]
pub enum LogSubcommand {
    /// Add an entry to a day's log
    Add {
        /// Entry text (a number for weight entries)
        content: String,

        /// Entry type (food, symptom, medication, weight, journal)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        log_type: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Change the text of an entry
    Edit {
        /// Entry ID
        id: String,

        /// New text; blank keeps the current text
        content: String,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },

    /// Show one day's entries
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl LogCommand {
    pub fn run<S: KeyValueStore>(&self, store: &Store<S>) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            LogSubcommand::Add {
                content,
                log_type,
                date,
            } => self.add(store, content, log_type, date),
            LogSubcommand::Edit { id, content } => self.edit(store, id, content),
            LogSubcommand::Delete { id } => self.delete(store, id),
            LogSubcommand::Show { date, format } => self.show(store, date, format),
        }
    }

    fn add<S: KeyValueStore>(
        &self,
        store: &Store<S>,
        content: &str,
        log_type: &str,
        date: &Option<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = date_or_today(date)?;
        let log_type: LogType = log_type.parse()?;

        let entry = match log_type {
            LogType::Weight => LogEntry::weight(content)?,
            _ => {
                let content = content.trim();
                if content.is_empty() {
                    return Err("Entry text cannot be empty".into());
                }
                LogEntry::new(log_type, content)
            }
        };

        let mut logs = store.get_logs();
        logs.add_entry(date.clone(), entry.clone());
        store.try_save_logs(&logs)?;

        println!("Logged {} entry on {}:", entry.log_type, date);
        println!("  {}", entry);
        println!("  ID: {}", entry.id);
        Ok(())
    }

    fn edit<S: KeyValueStore>(
        &self,
        store: &Store<S>,
        id: &str,
        content: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut logs = store.get_logs();
        match logs.update_entry(id, content) {
            None => return Err(format!("Entry not found: {}", id).into()),
            Some(false) => {
                return Err(format!("Invalid weight '{}'. Enter a positive number.", content).into())
            }
            Some(true) => {}
        }
        store.try_save_logs(&logs)?;

        if let Some((date, entry)) = logs.find(id) {
            println!("Updated entry on {}:", date);
            println!("  {}", entry);
        }
        Ok(())
    }

    fn delete<S: KeyValueStore>(
        &self,
        store: &Store<S>,
        id: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut logs = store.get_logs();
        let removed = logs
            .remove_entry(id)
            .ok_or_else(|| format!("Entry not found: {}", id))?;
        store.try_save_logs(&logs)?;

        println!("Deleted {} entry: {}", removed.log_type, removed.content);
        Ok(())
    }

    fn show<S: KeyValueStore>(
        &self,
        store: &Store<S>,
        date: &Option<String>,
        format: &OutputFormat,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = date_or_today(date)?;
        let logs = store.get_logs();

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(logs.day(&date))?);
            }
            OutputFormat::Text => {
                let groups = logs.grouped(&date);
                if groups.is_empty() {
                    println!("No entries for {}.", date);
                    return Ok(());
                }
                println!("Log for {}", date);
                for (log_type, entries) in groups {
                    println!();
                    println!("[{}]", log_type);
                    for entry in entries {
                        println!("- {}  ({})", entry, entry.id);
                    }
                }
            }
        }
        Ok(())
    }
}
