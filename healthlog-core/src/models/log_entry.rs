use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::log_type::LogType;

const WEIGHT_UNIT: &str = "lbs";

/// A single journal entry inside one day's bucket.
///
/// `timestamp` is a locale time-of-day string such as `10:00:00 AM`. It is kept
/// verbatim and only ever compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub log_type: LogType,
    pub content: String,
}

impl LogEntry {
    pub fn new(log_type: LogType, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: current_timestamp(),
            log_type,
            content: content.into(),
        }
    }

    /// Creates a weight entry from user input such as `"182.4"`.
    pub fn weight(input: &str) -> Result<Self, String> {
        let content = format_weight(input)
            .ok_or_else(|| format!("Invalid weight '{}'. Enter a positive number.", input))?;
        Ok(Self::new(LogType::Weight, content))
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Numeric value of a weight entry, without the unit.
    pub fn weight_value(&self) -> Option<f64> {
        if self.log_type != LogType::Weight {
            return None;
        }
        strip_weight_unit(&self.content).parse().ok()
    }

    /// Text shown to the user when editing: weights lose their unit suffix.
    pub fn editable_content(&self) -> String {
        match self.log_type {
            LogType::Weight => strip_weight_unit(&self.content).to_string(),
            _ => self.content.clone(),
        }
    }

    /// Replaces the content of the entry.
    ///
    /// Blank input keeps the current content. A weight edit must be a positive
    /// number, otherwise the entry is left untouched and `false` is returned.
    pub fn update_content(&mut self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return true;
        }
        if self.log_type == LogType::Weight {
            return match format_weight(trimmed) {
                Some(content) => {
                    self.content = content;
                    true
                }
                None => false,
            };
        }
        self.content = trimmed.to_string();
        true
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.timestamp, self.content)
    }
}

/// Local time of day in the `h:mm:ss AM` shape the journal has always used.
pub fn current_timestamp() -> String {
    Local::now().format("%-I:%M:%S %p").to_string()
}

fn format_weight(input: &str) -> Option<String> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(format!("{} {}", trimmed, WEIGHT_UNIT)),
        _ => None,
    }
}

fn strip_weight_unit(content: &str) -> &str {
    match content.to_ascii_lowercase().find(WEIGHT_UNIT) {
        Some(idx) => content[..idx].trim(),
        None => content.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_has_id_and_timestamp() {
        let entry = LogEntry::new(LogType::Food, "Oatmeal");
        assert!(!entry.id.is_empty());
        assert!(entry.timestamp.ends_with("AM") || entry.timestamp.ends_with("PM"));
        assert_eq!(entry.content, "Oatmeal");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = LogEntry::new(LogType::Food, "a");
        let b = LogEntry::new(LogType::Food, "b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_weight_entry() {
        let entry = LogEntry::weight(" 182.4 ").unwrap();
        assert_eq!(entry.log_type, LogType::Weight);
        assert_eq!(entry.content, "182.4 lbs");
        assert_eq!(entry.weight_value(), Some(182.4));
        assert_eq!(entry.editable_content(), "182.4");
    }

    #[test]
    fn test_weight_rejects_invalid_input() {
        assert!(LogEntry::weight("").is_err());
        assert!(LogEntry::weight("abc").is_err());
        assert!(LogEntry::weight("0").is_err());
        assert!(LogEntry::weight("-3").is_err());
    }

    #[test]
    fn test_update_weight_keeps_unit() {
        let mut entry = LogEntry::weight("180").unwrap();
        assert!(entry.update_content("178.5"));
        assert_eq!(entry.content, "178.5 lbs");
    }

    #[test]
    fn test_invalid_weight_update_leaves_entry() {
        let mut entry = LogEntry::weight("180").unwrap();
        assert!(!entry.update_content("heavy"));
        assert_eq!(entry.content, "180 lbs");
    }

    #[test]
    fn test_blank_update_keeps_content() {
        let mut entry = LogEntry::new(LogType::Journal, "Felt fine");
        assert!(entry.update_content("   "));
        assert_eq!(entry.content, "Felt fine");

        assert!(entry.update_content(" Felt better "));
        assert_eq!(entry.content, "Felt better");
    }

    #[test]
    fn test_weight_value_on_other_types() {
        let entry = LogEntry::new(LogType::Food, "150 lbs of pasta");
        assert_eq!(entry.weight_value(), None);
    }

    #[test]
    fn test_json_uses_type_field() {
        let entry = LogEntry::new(LogType::Symptom, "Nausea").with_timestamp("9:15:00 AM");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Symptom");
        assert_eq!(json["timestamp"], "9:15:00 AM");

        let parsed: LogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_display() {
        let entry = LogEntry::new(LogType::Food, "Toast").with_timestamp("8:00:00 AM");
        assert_eq!(format!("{}", entry), "(8:00:00 AM) Toast");
    }
}
