//! Human-readable share reports.
//!
//! These are meant for reading or emailing. They drop ids, doctor visits and
//! summaries, so an import of a report can only recover part of the data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::sections::{header_token, SectionKind};
use crate::models::{DailyLogs, Medication};

/// Line printed under each report header.
pub const DIVIDER: &str = "=========================";

/// Which spelling of the section headers a report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// `Medication List` / `Health Log History`
    #[default]
    Legacy,
    /// `CURRENT ACTIVE MEDICATIONS` / `DAILY LOG HISTORY`
    Current,
}

impl fmt::Display for ReportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStyle::Legacy => write!(f, "legacy"),
            ReportStyle::Current => write!(f, "current"),
        }
    }
}

impl FromStr for ReportStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(ReportStyle::Legacy),
            "current" => Ok(ReportStyle::Current),
            _ => Err(format!(
                "Invalid report style '{}'. Valid options: legacy, current",
                s
            )),
        }
    }
}

/// Formats a `YYYY-MM-DD` key as `Monday, January 1, 2024`.
pub fn display_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
}

pub fn medication_report(medications: &[Medication], style: ReportStyle) -> String {
    if medications.is_empty() {
        return "No medications to share.".to_string();
    }

    let mut content = String::new();
    content.push_str(header_token(SectionKind::Medications, style));
    content.push('\n');
    content.push_str(DIVIDER);
    content.push_str("\n\n");

    for med in medications {
        content.push_str(&format!("- {}\n", med.name));
        content.push_str(&format!("  Dosage: {}\n", med.dosage));
        content.push_str(&format!("  Frequency: {}\n\n", med.frequency));
    }

    content
}

/// Log history for the inclusive `[start, end]` date range, newest day first.
pub fn log_history_report(logs: &DailyLogs, start: &str, end: &str, style: ReportStyle) -> String {
    let dates = logs.dates_between(start, end);
    if dates.is_empty() {
        return format!("No log entries found between {} and {}.", start, end);
    }

    let mut content = String::new();
    content.push_str(header_token(SectionKind::LogHistory, style));
    content.push('\n');
    content.push_str(&format!("From: {} To: {}\n", start, end));
    content.push_str(DIVIDER);
    content.push_str("\n\n");

    for date in dates {
        let shown = display_date(date).unwrap_or_else(|| date.to_string());
        content.push_str(&format!("--- {} ---\n\n", shown));

        let groups = logs.grouped(date);
        if groups.is_empty() {
            content.push_str("No entries for this day.\n");
            continue;
        }
        for (log_type, entries) in groups {
            content.push_str(&format!("[{}]\n", log_type));
            for entry in entries {
                // Continuation lines are indented so they never read as headers.
                let text = entry.content.replace('\n', "\n  ");
                content.push_str(&format!("- ({}) {}\n", entry.timestamp, text));
            }
            content.push('\n');
        }
    }

    content
}

/// Medication report followed by the log history report.
pub fn full_report(
    medications: &[Medication],
    logs: &DailyLogs,
    start: &str,
    end: &str,
    style: ReportStyle,
) -> String {
    format!(
        "{}\n\n{}",
        medication_report(medications, style),
        log_history_report(logs, start, end, style)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LogEntry, LogType};

    fn sample_logs() -> DailyLogs {
        let mut logs = DailyLogs::new();
        logs.add_entry(
            "2024-01-01",
            LogEntry::new(LogType::Symptom, "Nausea").with_timestamp("11:00:00 AM"),
        );
        logs.add_entry(
            "2024-01-01",
            LogEntry::new(LogType::Food, "Oatmeal").with_timestamp("10:00:00 AM"),
        );
        logs.add_entry(
            "2024-01-02",
            LogEntry::new(LogType::Weight, "180 lbs").with_timestamp("7:00:00 AM"),
        );
        logs
    }

    #[test]
    fn test_display_date() {
        assert_eq!(
            display_date("2024-01-01").as_deref(),
            Some("Monday, January 1, 2024")
        );
        assert_eq!(
            display_date("2026-01-06").as_deref(),
            Some("Tuesday, January 6, 2026")
        );
        assert!(display_date("not-a-date").is_none());
    }

    #[test]
    fn test_medication_report_layout() {
        let meds = vec![Medication::new("Prucalopride")
            .with_dosage("2mg")
            .with_frequency("Daily")];

        let report = medication_report(&meds, ReportStyle::Legacy);
        assert_eq!(
            report,
            "Medication List\n=========================\n\n- Prucalopride\n  Dosage: 2mg\n  Frequency: Daily\n\n"
        );
    }

    #[test]
    fn test_medication_report_current_style() {
        let meds = vec![Medication::new("Ondansetron")];
        let report = medication_report(&meds, ReportStyle::Current);
        assert!(report.starts_with("CURRENT ACTIVE MEDICATIONS\n"));
    }

    #[test]
    fn test_empty_medication_report() {
        assert_eq!(
            medication_report(&[], ReportStyle::Legacy),
            "No medications to share."
        );
    }

    #[test]
    fn test_log_history_report_layout() {
        let report = log_history_report(&sample_logs(), "2024-01-01", "2024-01-01", ReportStyle::Legacy);
        assert_eq!(
            report,
            "Health Log History\n\
             From: 2024-01-01 To: 2024-01-01\n\
             =========================\n\n\
             --- Monday, January 1, 2024 ---\n\n\
             [Food]\n\
             - (10:00:00 AM) Oatmeal\n\n\
             [Symptom]\n\
             - (11:00:00 AM) Nausea\n\n"
        );
    }

    #[test]
    fn test_log_history_newest_first() {
        let report = log_history_report(&sample_logs(), "2024-01-01", "2024-01-31", ReportStyle::Current);
        assert!(report.starts_with("DAILY LOG HISTORY\n"));
        let jan2 = report.find("January 2, 2024").unwrap();
        let jan1 = report.find("January 1, 2024").unwrap();
        assert!(jan2 < jan1);
    }

    #[test]
    fn test_log_history_empty_day() {
        let mut logs = DailyLogs::new();
        logs.insert_day("2024-01-03", Vec::new());
        let report = log_history_report(&logs, "2024-01-01", "2024-01-31", ReportStyle::Legacy);
        assert!(report.contains("No entries for this day."));
    }

    #[test]
    fn test_log_history_out_of_range() {
        let report = log_history_report(&sample_logs(), "2023-01-01", "2023-01-31", ReportStyle::Legacy);
        assert_eq!(report, "No log entries found between 2023-01-01 and 2023-01-31.");
    }

    #[test]
    fn test_multiline_entry_is_indented() {
        let mut logs = DailyLogs::new();
        logs.add_entry(
            "2024-01-01",
            LogEntry::new(LogType::Journal, "Saw GI\nNew Medication List").with_timestamp("9:00:00 AM"),
        );
        let report = log_history_report(&logs, "2024-01-01", "2024-01-01", ReportStyle::Legacy);
        assert!(report.contains("- (9:00:00 AM) Saw GI\n  New Medication List\n"));
    }

    #[test]
    fn test_full_report_separates_sections_with_blank_line() {
        let report = full_report(&[], &sample_logs(), "2024-01-01", "2024-01-31", ReportStyle::Legacy);
        assert!(report.starts_with("No medications to share.\n\nHealth Log History\n"));
    }

    #[test]
    fn test_report_style_from_str() {
        assert_eq!(ReportStyle::from_str("Current").unwrap(), ReportStyle::Current);
        assert_eq!(ReportStyle::from_str("legacy").unwrap(), ReportStyle::Legacy);
        assert!(ReportStyle::from_str("fancy").is_err());
    }
}
