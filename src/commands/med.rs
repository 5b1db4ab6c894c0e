use clap::{Args, Subcommand};
use healthlog_core::{KeyValueStore, Medication, Store};

use super::OutputFormat;

#[derive(Args)]
pub struct MedCommand {
    #[command(subcommand)]
    pub command: MedSubcommand,
}

#[derive(Subcommand)]
pub enum MedSubcommand {
    /// Add a medication
    Add {
        /// Medication name
        name: String,

        /// Dosage (e.g. "2mg")
        #[arg(long)]
        dosage: Option<String>,

        /// How often it is taken (e.g. "Daily")
        #[arg(long)]
        frequency: Option<String>,
    },

    /// List medications
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update a medication
    Update {
        /// Medication ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New dosage
        #[arg(long)]
        dosage: Option<String>,

        /// New frequency
        #[arg(long)]
        frequency: Option<String>,
    },

    /// Remove a medication
    Remove {
        /// Medication ID
        id: String,
    },
}

impl MedCommand {
    pub fn run<S: KeyValueStore>(&self, store: &Store<S>) -> Result<(), Box<dyn std::error::Error>> {
        let mut medications = store.get_medications();

        match &self.command {
            MedSubcommand::Add {
                name,
                dosage,
                frequency,
            } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err("Medication name cannot be empty".into());
                }
                let med = Medication::new(name)
                    .with_dosage(dosage.clone().unwrap_or_default())
                    .with_frequency(frequency.clone().unwrap_or_default());
                medications.push(med.clone());
                store.try_save_medications(&medications)?;

                println!("Added medication: {}", med);
                println!("  ID: {}", med.id);
            }
            MedSubcommand::List { format } => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&medications)?);
                }
                OutputFormat::Text => {
                    if medications.is_empty() {
                        println!("No medications.");
                    }
                    for med in &medications {
                        println!("{}  ({})", med, med.id);
                    }
                }
            },
            MedSubcommand::Update {
                id,
                name,
                dosage,
                frequency,
            } => {
                let med = medications
                    .iter_mut()
                    .find(|m| &m.id == id)
                    .ok_or_else(|| format!("Medication not found: {}", id))?;
                if let Some(name) = name {
                    med.name = name.clone();
                }
                if let Some(dosage) = dosage {
                    med.dosage = dosage.clone();
                }
                if let Some(frequency) = frequency {
                    med.frequency = frequency.clone();
                }
                let updated = med.clone();
                store.try_save_medications(&medications)?;

                println!("Updated medication: {}", updated);
            }
            MedSubcommand::Remove { id } => {
                let pos = medications
                    .iter()
                    .position(|m| &m.id == id)
                    .ok_or_else(|| format!("Medication not found: {}", id))?;
                let removed = medications.remove(pos);
                store.try_save_medications(&medications)?;

                println!("Removed medication: {}", removed.name);
            }
        }
        Ok(())
    }
}
