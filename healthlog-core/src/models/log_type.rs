use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a journal entry.
///
/// Declaration order is the canonical grouping order used when rendering a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogType {
    Food,
    Symptom,
    Medication,
    Weight,
    Journal,
}

impl LogType {
    pub const ALL: [LogType; 5] = [
        LogType::Food,
        LogType::Symptom,
        LogType::Medication,
        LogType::Weight,
        LogType::Journal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Food => "Food",
            LogType::Symptom => "Symptom",
            LogType::Medication => "Medication",
            LogType::Weight => "Weight",
            LogType::Journal => "Journal",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(LogType::Food),
            "symptom" => Ok(LogType::Symptom),
            "medication" => Ok(LogType::Medication),
            "weight" => Ok(LogType::Weight),
            "journal" => Ok(LogType::Journal),
            _ => Err(format!(
                "Invalid log type '{}'. Valid options: food, symptom, medication, weight, journal",
                s
            )),
        }
    }
}
