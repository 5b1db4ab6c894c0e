//! Line parsers for share report sections.
//!
//! Every parser here is total: input it does not understand is skipped, never
//! turned into an error, so one bad line or day cannot sink a whole import.

use chrono::{NaiveDate, Weekday};
use std::str::FromStr;
use uuid::Uuid;

use super::sections::starts_record;
use crate::models::{DailyLogs, LogEntry, LogType, Medication};

const BULLETS: [&str; 3] = ["- ", "* ", "• "];

/// Date shapes accepted in day delimiters, after any leading weekday is removed.
const DATE_FORMATS: [&str; 6] = [
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
];

fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    BULLETS.iter().find_map(|b| trimmed.strip_prefix(b))
}

/// Value following `label` on the line, cut at an optional `|` separator.
fn labelled_value(line: &str, label: &str) -> Option<String> {
    let idx = line.find(label)?;
    let rest = &line[idx + label.len()..];
    let value = rest.split('|').next().unwrap_or(rest);
    Some(value.trim().to_string())
}

/// Parses the body of a medication section.
///
/// A bullet line starts a medication named by the rest of the line; `Dosage:`
/// and `Frequency:` lines fill in the medication being read. Ids are freshly
/// generated.
pub(crate) fn parse_medications(lines: &[&str]) -> Vec<Medication> {
    let mut medications = Vec::new();
    let mut current: Option<Medication> = None;

    for line in lines {
        if let Some(name) = strip_bullet(line) {
            medications.extend(current.take());
            let name = name.trim();
            if !name.is_empty() {
                current = Some(Medication::new(name));
            }
            continue;
        }

        if let Some(med) = current.as_mut() {
            if let Some(dosage) = labelled_value(line, "Dosage:") {
                med.dosage = dosage;
            }
            if let Some(frequency) = labelled_value(line, "Frequency:") {
                med.frequency = frequency;
            }
        }
    }
    medications.extend(current);

    medications
}

/// Date text of a `--- <date> ---` delimiter line.
pub(crate) fn parse_day_delimiter(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if !trimmed.starts_with("---") || !trimmed.ends_with("---") {
        return None;
    }
    let inner = trimmed.trim_matches('-').trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

/// `Some(Some(t))` for a `[Type]` marker, `Some(None)` for a marker naming an
/// unknown type, `None` if the line is not a marker.
pub(crate) fn parse_type_marker(line: &str) -> Option<Option<LogType>> {
    let inner = line.trim().strip_prefix('[')?.strip_suffix(']')?;
    Some(LogType::from_str(inner).ok())
}

/// Splits `(timestamp) content` into its parts.
///
/// The timestamp ends at the first `)` that is followed by whitespace, so a
/// timestamp may itself contain parentheses.
pub(crate) fn parse_entry_text(text: &str) -> Option<(String, String)> {
    let body = text.trim().strip_prefix('(')?;
    let mut chars = body.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != ')' {
            continue;
        }
        match chars.peek() {
            Some((_, next)) if next.is_whitespace() => {
                let content = body[idx + 1..].trim();
                if content.is_empty() {
                    return None;
                }
                return Some((body[..idx].trim().to_string(), content.to_string()));
            }
            _ => continue,
        }
    }
    None
}

fn strip_weekday(text: &str) -> &str {
    let first = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .unwrap_or("");
    if !first.is_empty() && first.chars().all(char::is_alphabetic) && Weekday::from_str(first).is_ok()
    {
        text[first.len()..].trim_start_matches(|c: char| c == ',' || c.is_whitespace())
    } else {
        text
    }
}

/// Parses the date of a day delimiter back into a calendar date.
///
/// Accepts the long form the reports print (`Monday, January 1, 2024`), the
/// day-first form (`Monday 1 January 2024`), ISO dates and US numeric dates.
/// The weekday is ignored.
pub fn parse_display_date(text: &str) -> Option<NaiveDate> {
    let text = strip_weekday(text.trim());
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Recovers the entries of one day block.
///
/// `[Type]` markers set the type of the entries that follow; a `- ` line
/// starts an entry and other text continues it. Entries under an unknown
/// type, before any marker, or without a `(timestamp)` are dropped.
pub(crate) fn parse_day_entries(lines: &[&str]) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let mut current_type: Option<LogType> = None;
    let mut pending: Option<(LogType, String)> = None;

    fn flush(pending: &mut Option<(LogType, String)>, entries: &mut Vec<LogEntry>) {
        if let Some((log_type, text)) = pending.take() {
            match parse_entry_text(&text) {
                Some((timestamp, content)) => entries.push(LogEntry {
                    id: Uuid::new_v4().to_string(),
                    timestamp,
                    log_type,
                    content,
                }),
                None => tracing::debug!("Dropping unparsable entry: {}", text),
            }
        }
    }

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(marker) = parse_type_marker(trimmed) {
            flush(&mut pending, &mut entries);
            if marker.is_none() {
                tracing::debug!("Unknown log type marker: {}", trimmed);
            }
            current_type = marker;
            continue;
        }

        if let Some(text) = trimmed.strip_prefix("- ") {
            flush(&mut pending, &mut entries);
            pending = current_type.map(|t| (t, text.to_string()));
            continue;
        }

        if let Some((_, text)) = pending.as_mut() {
            text.push('\n');
            text.push_str(trimmed);
        }
    }
    flush(&mut pending, &mut entries);

    entries
}

/// Result of reading a log history section.
#[derive(Debug, Default)]
pub(crate) struct ParsedHistory {
    pub logs: DailyLogs,
    /// Delimiter date texts that could not be understood.
    pub skipped_dates: Vec<String>,
}

/// Parses the body of a log history section into days keyed `YYYY-MM-DD`.
///
/// Days whose date cannot be read are skipped and reported; days with no
/// recoverable entries are left out.
pub(crate) fn parse_log_history(lines: &[&str]) -> ParsedHistory {
    let mut parsed = ParsedHistory::default();
    let mut blocks: Vec<(&str, Vec<&str>)> = Vec::new();

    for line in lines {
        if let Some(date_text) = parse_day_delimiter(line) {
            blocks.push((date_text, Vec::new()));
        } else if let Some((_, block)) = blocks.last_mut() {
            block.push(line);
        } else if starts_record(line) {
            tracing::debug!("Ignoring line before first day: {}", line);
        }
    }

    for (date_text, block) in blocks {
        let Some(date) = parse_display_date(date_text) else {
            tracing::warn!("Skipping day with unreadable date '{}'", date_text);
            parsed.skipped_dates.push(date_text.to_string());
            continue;
        };

        let entries = parse_day_entries(&block);
        if entries.is_empty() {
            tracing::debug!("No entries recovered for {}", date);
            continue;
        }

        let key = date.format("%Y-%m-%d").to_string();
        for entry in entries {
            parsed.logs.add_entry(key.clone(), entry);
        }
    }

    parsed
}
