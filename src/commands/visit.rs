use clap::{Args, Subcommand};
use healthlog_core::models::upsert_visit;
use healthlog_core::{DoctorVisit, KeyValueStore, Store, VisitType};

use super::{date_or_today, parse_date, OutputFormat};

#[derive(Args)]
pub struct VisitCommand {
    #[command(subcommand)]
    pub command: VisitSubcommand,
}

#[derive(Subcommand)]
pub enum VisitSubcommand {
    /// Record a doctor visit
    Add {
        /// Why the visit happened
        purpose: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Notes from the visit
        #[arg(long)]
        details: Option<String>,

        /// Visit type (can be repeated), e.g. "follow-up", "lab work"
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        visit_types: Vec<String>,
    },

    /// List visits, newest first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update a visit
    Update {
        /// Visit ID
        id: String,

        /// New date (YYYY-MM-DD)
        #[arg(long, short)]
        date: Option<String>,

        /// New purpose
        #[arg(long)]
        purpose: Option<String>,

        /// New notes; clears the stored summary if they differ
        #[arg(long)]
        details: Option<String>,

        /// Replace the visit types (can be repeated)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        visit_types: Vec<String>,
    },
}

fn parse_visit_types(raw: &[String]) -> Result<Vec<VisitType>, String> {
    raw.iter().map(|t| t.parse()).collect()
}

impl VisitCommand {
    pub fn run<S: KeyValueStore>(&self, store: &Store<S>) -> Result<(), Box<dyn std::error::Error>> {
        let mut visits = store.get_doctor_visits();

        match &self.command {
            VisitSubcommand::Add {
                purpose,
                date,
                details,
                visit_types,
            } => {
                let date = date_or_today(date)?;
                let types = parse_visit_types(visit_types)?;
                let visit = DoctorVisit::new(date, purpose.trim())
                    .with_details(details.clone().unwrap_or_default())
                    .with_visit_types(types);
                visits.push(visit.clone());
                store.try_save_doctor_visits(&visits)?;

                println!("Recorded visit on {}: {}", visit.date, visit.purpose);
                println!("  ID: {}", visit.id);
            }
            VisitSubcommand::List { format } => {
                visits.sort_by(|a, b| b.date.cmp(&a.date));
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&visits)?);
                    }
                    OutputFormat::Text => {
                        if visits.is_empty() {
                            println!("No doctor visits.");
                        }
                        for visit in &visits {
                            print_visit(visit);
                        }
                    }
                }
            }
            VisitSubcommand::Update {
                id,
                date,
                purpose,
                details,
                visit_types,
            } => {
                let mut visit = visits
                    .iter()
                    .find(|v| &v.id == id)
                    .cloned()
                    .ok_or_else(|| format!("Visit not found: {}", id))?;

                if let Some(date) = date {
                    parse_date(date)?;
                    visit.date = date.clone();
                }
                if let Some(purpose) = purpose {
                    visit.purpose = purpose.clone();
                }
                if let Some(details) = details {
                    if visit.set_details(details.clone()) {
                        tracing::debug!("Visit {} details changed, summary cleared", visit.id);
                    }
                }
                if !visit_types.is_empty() {
                    visit.set_visit_types(parse_visit_types(visit_types)?);
                }

                upsert_visit(&mut visits, visit.clone());
                store.try_save_doctor_visits(&visits)?;

                println!("Updated visit:");
                print_visit(&visit);
            }
        }
        Ok(())
    }
}

fn print_visit(visit: &DoctorVisit) {
    println!("{}  {}  ({})", visit.date, visit.purpose, visit.id);
    if !visit.visit_types.is_empty() {
        println!("  Types: {}", visit.visit_types.join(", "));
    }
    if !visit.details.is_empty() {
        println!("  Details: {}", visit.details);
    }
    if let Some(summary) = &visit.ai_summary {
        println!("  Summary: {}", summary);
    }
    println!();
}
