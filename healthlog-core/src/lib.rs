//! Healthlog Core Library
//!
//! Journal records, their local persistence, and export/import of those
//! records as JSON or as human-readable share reports.

pub mod interchange;
pub mod models;
pub mod storage;

pub use interchange::{
    ExportEnvelope, ImportError, ImportFormat, ImportReport, Interchange, ReportStyle,
    EXPORT_VERSION,
};
pub use models::{DailyLogs, DoctorVisit, LogEntry, LogType, Medication, VisitType};
pub use storage::{FileStore, KeyValueStore, MemoryStore, RecordKey, StorageError, Store};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
