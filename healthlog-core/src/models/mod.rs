mod daily_logs;
mod doctor_visit;
mod log_entry;
mod log_type;
mod medication;

pub use daily_logs::DailyLogs;
pub use doctor_visit::{upsert_visit, DoctorVisit, VisitType};
pub use log_entry::{current_timestamp, LogEntry};
pub use log_type::LogType;
pub use medication::Medication;
