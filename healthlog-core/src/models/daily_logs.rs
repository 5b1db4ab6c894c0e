use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::log_entry::LogEntry;
use super::log_type::LogType;

/// Journal entries bucketed by calendar date (`YYYY-MM-DD`).
///
/// Keys are kept as strings so that whatever an export contained survives an
/// import unchanged. Entries keep insertion order; sorting happens at render
/// time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyLogs(BTreeMap<String, Vec<LogEntry>>);

impl DailyLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of date keys, including keys whose bucket is empty.
    pub fn day_count(&self) -> usize {
        self.0.len()
    }

    pub fn entry_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn day(&self, date: &str) -> &[LogEntry] {
        self.0.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<LogEntry>)> {
        self.0.iter()
    }

    pub fn add_entry(&mut self, date: impl Into<String>, entry: LogEntry) {
        self.0.entry(date.into()).or_default().push(entry);
    }

    /// Sets a whole day's bucket, replacing whatever was there.
    pub fn insert_day(&mut self, date: impl Into<String>, entries: Vec<LogEntry>) {
        self.0.insert(date.into(), entries);
    }

    /// Finds an entry by id across all days.
    pub fn find(&self, id: &str) -> Option<(&str, &LogEntry)> {
        self.0.iter().find_map(|(date, entries)| {
            entries
                .iter()
                .find(|e| e.id == id)
                .map(|e| (date.as_str(), e))
        })
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut LogEntry> {
        self.0
            .values_mut()
            .flat_map(|entries| entries.iter_mut())
            .find(|e| e.id == id)
    }

    /// Edits an entry's content in place.
    ///
    /// Returns `None` if no entry has this id, otherwise whether the edit was
    /// accepted (see [`LogEntry::update_content`]).
    pub fn update_entry(&mut self, id: &str, content: &str) -> Option<bool> {
        self.find_mut(id).map(|entry| entry.update_content(content))
    }

    /// Removes an entry by id. The date key stays even if its bucket empties.
    pub fn remove_entry(&mut self, id: &str) -> Option<LogEntry> {
        for entries in self.0.values_mut() {
            if let Some(pos) = entries.iter().position(|e| e.id == id) {
                return Some(entries.remove(pos));
            }
        }
        None
    }

    /// Entries of one day grouped by type in canonical order, each group
    /// sorted by its timestamp text. Empty groups are omitted.
    pub fn grouped(&self, date: &str) -> Vec<(LogType, Vec<&LogEntry>)> {
        let entries = self.day(date);
        LogType::ALL
            .iter()
            .filter_map(|log_type| {
                let mut group: Vec<&LogEntry> =
                    entries.iter().filter(|e| e.log_type == *log_type).collect();
                if group.is_empty() {
                    return None;
                }
                group.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
                Some((*log_type, group))
            })
            .collect()
    }

    /// Date keys within `[start, end]` (string comparison), newest first.
    pub fn dates_between(&self, start: &str, end: &str) -> Vec<&str> {
        if start > end {
            return Vec::new();
        }
        self.0
            .range(start.to_string()..=end.to_string())
            .map(|(date, _)| date.as_str())
            .rev()
            .collect()
    }

    /// Merges imported days into this set: every date in `other` replaces the
    /// bucket of the same date here, all other dates are left alone.
    ///
    /// Returns the number of days written.
    pub fn merge_days(&mut self, other: DailyLogs) -> usize {
        let count = other.0.len();
        self.0.extend(other.0);
        count
    }
}

impl FromIterator<(String, Vec<LogEntry>)> for DailyLogs {
    fn from_iter<I: IntoIterator<Item = (String, Vec<LogEntry>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
