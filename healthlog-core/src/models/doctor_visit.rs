use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Fixed vocabulary for tagging a doctor visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitType {
    FollowUp,
    CheckUp,
    XRay,
    Surgery,
    LabWork,
    Specialist,
    Emergency,
    PhysicalTherapy,
    Other,
}

impl VisitType {
    pub const ALL: [VisitType; 9] = [
        VisitType::FollowUp,
        VisitType::CheckUp,
        VisitType::XRay,
        VisitType::Surgery,
        VisitType::LabWork,
        VisitType::Specialist,
        VisitType::Emergency,
        VisitType::PhysicalTherapy,
        VisitType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VisitType::FollowUp => "Follow-up",
            VisitType::CheckUp => "Check-up",
            VisitType::XRay => "X-ray",
            VisitType::Surgery => "Surgery",
            VisitType::LabWork => "Lab Work",
            VisitType::Specialist => "Specialist",
            VisitType::Emergency => "Emergency",
            VisitType::PhysicalTherapy => "Physical Therapy",
            VisitType::Other => "Other",
        }
    }
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VisitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        VisitType::ALL
            .iter()
            .copied()
            .find(|t| normalize_label(t.label()) == wanted)
            .ok_or_else(|| {
                let labels: Vec<&str> = VisitType::ALL.iter().map(|t| t.label()).collect();
                format!(
                    "Invalid visit type '{}'. Valid options: {}",
                    s,
                    labels.join(", ")
                )
            })
    }
}

fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A recorded visit to a doctor.
///
/// `visit_types` holds labels from [`VisitType`] as plain strings so that data
/// imported from elsewhere is never rejected for an unfamiliar label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorVisit {
    pub id: String,
    pub date: String,
    pub purpose: String,
    pub details: String,
    #[serde(default)]
    pub visit_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl DoctorVisit {
    pub fn new(date: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: date.into(),
            purpose: purpose.into(),
            details: String::new(),
            visit_types: Vec::new(),
            ai_summary: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_visit_types(mut self, types: impl IntoIterator<Item = VisitType>) -> Self {
        self.set_visit_types(types);
        self
    }

    /// Replaces the visit types, dropping duplicates but keeping first-seen order.
    pub fn set_visit_types(&mut self, types: impl IntoIterator<Item = VisitType>) {
        self.visit_types.clear();
        for t in types {
            let label = t.label().to_string();
            if !self.visit_types.contains(&label) {
                self.visit_types.push(label);
            }
        }
    }

    /// Updates the visit details. A summary derived from the old details no
    /// longer applies and is cleared.
    ///
    /// Returns `true` if the details actually changed.
    pub fn set_details(&mut self, details: impl Into<String>) -> bool {
        let details = details.into();
        if details == self.details {
            return false;
        }
        self.details = details;
        self.ai_summary = None;
        true
    }

    /// True when a summary should be (re)generated by the summarizer.
    pub fn needs_summary(&self) -> bool {
        self.ai_summary.is_none() && !self.details.trim().is_empty()
    }
}

/// Inserts a visit or replaces the one with the same id, keeping list order.
pub fn upsert_visit(visits: &mut Vec<DoctorVisit>, visit: DoctorVisit) {
    match visits.iter_mut().find(|v| v.id == visit.id) {
        Some(existing) => *existing = visit,
        None => visits.push(visit),
    }
}
