//! Moving journal data between installations.
//!
//! Two text formats carry data out of one data directory and into another:
//!
//! - the JSON [`ExportEnvelope`], which is lossless;
//! - the share reports from [`report`], written for people and read back on a
//!   best-effort basis when pasted into an import.
//!
//! Imports apply different policies per record and format, and these are
//! kept deliberately:
//!
//! | source            | logs    | medications | doctor visits |
//! |-------------------|---------|-------------|---------------|
//! | JSON envelope     | replace | replace     | replace       |
//! | share report      | merge   | replace     | (not carried) |
//!
//! "merge" means each imported date replaces that date's entries while all
//! other dates are kept.

mod envelope;
mod parse;
pub mod report;
mod sections;

use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError, Store};

pub use envelope::{ExportEnvelope, EXPORT_VERSION};
pub use parse::parse_display_date;
pub use report::ReportStyle;
pub use sections::SectionKind;

/// Which format an import was read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Envelope,
    ShareText,
}

/// What an import changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub format: ImportFormat,
    /// Days in the replacement log set (envelope imports).
    pub logs_replaced: Option<usize>,
    /// Days written into the existing logs (share report imports).
    pub days_merged: usize,
    /// Entries recovered from a share report.
    pub entries_imported: usize,
    /// Size of the replacement medication list, if it was replaced.
    pub medications_replaced: Option<usize>,
    /// Size of the replacement doctor visit list, if it was replaced.
    pub doctor_visits_replaced: Option<usize>,
    /// Day delimiters whose date could not be read.
    pub skipped_dates: Vec<String>,
}

impl ImportReport {
    fn new(format: ImportFormat) -> Self {
        Self {
            format,
            logs_replaced: None,
            days_merged: 0,
            entries_imported: 0,
            medications_replaced: None,
            doctor_visits_replaced: None,
            skipped_dates: Vec::new(),
        }
    }

    /// True if any record was written.
    pub fn changed(&self) -> bool {
        self.logs_replaced.is_some()
            || self.days_merged > 0
            || self.medications_replaced.is_some()
            || self.doctor_visits_replaced.is_some()
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Nothing to import")]
    Empty,

    #[error("Unrecognized format: not an export and no known report header found")]
    UnrecognizedFormat,

    #[error("Export data is not valid: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    #[error("Report contained no medications or log entries that could be read")]
    NothingImported,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Export and import over a [`Store`].
pub struct Interchange<'a, S: KeyValueStore> {
    store: &'a Store<S>,
}

impl<'a, S: KeyValueStore> Interchange<'a, S> {
    pub fn new(store: &'a Store<S>) -> Self {
        Self { store }
    }

    /// Snapshot of every record in the canonical envelope.
    pub fn envelope(&self) -> ExportEnvelope {
        ExportEnvelope::new(
            self.store.get_logs(),
            self.store.get_medications(),
            self.store.get_doctor_visits(),
        )
    }

    /// Serialized canonical export of every record.
    pub fn export_all(&self, pretty: bool) -> Result<String, serde_json::Error> {
        self.envelope().to_json(pretty)
    }

    /// Imports pasted text, reporting only success or failure.
    ///
    /// Never panics and never returns an error; failures are logged.
    pub fn import_all(&self, text: &str) -> bool {
        match self.import(text) {
            Ok(report) => {
                tracing::info!("Import finished: {:?}", report);
                true
            }
            Err(e) => {
                tracing::error!("Failed to import data: {}", e);
                false
            }
        }
    }

    /// Imports pasted text: an export envelope if it is one, otherwise a share
    /// report.
    pub fn import(&self, text: &str) -> Result<ImportReport, ImportError> {
        if text.trim().is_empty() {
            return Err(ImportError::Empty);
        }

        let envelope_error = match ExportEnvelope::parse(text) {
            Ok(envelope) if envelope.has_data() => return self.import_envelope(envelope),
            Ok(_) => {
                tracing::debug!("JSON input carries no records, trying share report");
                None
            }
            Err(e) => {
                tracing::debug!("Not an export envelope ({}), trying share report", e);
                Some(e)
            }
        };

        match self.import_share_text(text) {
            Err(ImportError::UnrecognizedFormat) if text.trim_start().starts_with('{') => {
                match envelope_error {
                    Some(e) => Err(ImportError::InvalidEnvelope(e)),
                    None => Err(ImportError::UnrecognizedFormat),
                }
            }
            result => result,
        }
    }

    /// Replaces every record present in the envelope.
    fn import_envelope(&self, envelope: ExportEnvelope) -> Result<ImportReport, ImportError> {
        if let Some(version) = envelope.version.as_deref() {
            if version != EXPORT_VERSION {
                tracing::warn!("Importing export version {} (expected {})", version, EXPORT_VERSION);
            }
        }

        let mut report = ImportReport::new(ImportFormat::Envelope);
        if let Some(logs) = &envelope.logs {
            self.store.try_save_logs(logs)?;
            report.logs_replaced = Some(logs.day_count());
        }
        if let Some(medications) = &envelope.medications {
            self.store.try_save_medications(medications)?;
            report.medications_replaced = Some(medications.len());
        }
        if let Some(visits) = &envelope.doctor_visits {
            self.store.try_save_doctor_visits(visits)?;
            report.doctor_visits_replaced = Some(visits.len());
        }
        Ok(report)
    }

    /// Reads medications and log history back out of a share report.
    fn import_share_text(&self, text: &str) -> Result<ImportReport, ImportError> {
        let found = sections::split_sections(text);
        if found.is_empty() {
            return Err(ImportError::UnrecognizedFormat);
        }

        let mut report = ImportReport::new(ImportFormat::ShareText);
        for section in found {
            match section.kind {
                SectionKind::Medications => {
                    let medications = parse::parse_medications(&section.lines);
                    if medications.is_empty() {
                        tracing::debug!("Medication section held no medications");
                        continue;
                    }
                    self.store.try_save_medications(&medications)?;
                    report.medications_replaced = Some(medications.len());
                }
                SectionKind::LogHistory => {
                    let parsed = parse::parse_log_history(&section.lines);
                    report.skipped_dates.extend(parsed.skipped_dates);
                    if parsed.logs.is_empty() {
                        tracing::debug!("Log history section held no readable days");
                        continue;
                    }
                    let mut logs = self.store.get_logs();
                    report.entries_imported = parsed.logs.entry_count();
                    let days = logs.merge_days(parsed.logs);
                    self.store.try_save_logs(&logs)?;
                    report.days_merged = days;
                }
            }
        }

        if report.changed() {
            Ok(report)
        } else {
            Err(ImportError::NothingImported)
        }
    }
}
