use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DailyLogs, DoctorVisit, Medication};

/// Version written into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// The canonical, lossless export of all records.
///
/// On import every field is optional: a data field that is absent (or
/// `null`) leaves the corresponding record alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<DailyLogs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<Medication>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_visits: Option<Vec<DoctorVisit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl ExportEnvelope {
    /// Envelope for a full export, stamped with the current time.
    pub fn new(logs: DailyLogs, medications: Vec<Medication>, doctor_visits: Vec<DoctorVisit>) -> Self {
        Self {
            logs: Some(logs),
            medications: Some(medications),
            doctor_visits: Some(doctor_visits),
            version: Some(EXPORT_VERSION.to_string()),
            exported_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Parses envelope text. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text.trim())
    }

    /// True if at least one of the data fields is present.
    pub fn has_data(&self) -> bool {
        self.logs.is_some() || self.medications.is_some() || self.doctor_visits.is_some()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
