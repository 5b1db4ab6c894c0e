//! Keys of the records kept in the key-value store.

/// The three records the journal persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    Logs,
    Medications,
    DoctorVisits,
}

impl RecordKey {
    pub const ALL: [RecordKey; 3] = [
        RecordKey::Logs,
        RecordKey::Medications,
        RecordKey::DoctorVisits,
    ];

    /// Key under which the record is stored.
    pub fn key(&self) -> &'static str {
        match self {
            RecordKey::Logs => "dailyLogs",
            RecordKey::Medications => "medications",
            RecordKey::DoctorVisits => "doctorVisits",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keys_are_distinct() {
        assert_eq!(RecordKey::Logs.key(), "dailyLogs");
        assert_eq!(RecordKey::Medications.key(), "medications");
        assert_eq!(RecordKey::DoctorVisits.key(), "doctorVisits");
    }
}
