use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, RecordKey, StorageError};
use crate::models::{DailyLogs, DoctorVisit, Medication};

/// Typed access to the journal's records.
///
/// Reads never fail: a missing record is empty, and an unreadable one is
/// logged and treated as empty. `save_*` writes through and logs failures
/// instead of returning them; `try_save_*` returns them.
#[derive(Debug)]
pub struct Store<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> Store<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn get_logs(&self) -> DailyLogs {
        self.load_or_default(RecordKey::Logs)
    }

    pub fn get_medications(&self) -> Vec<Medication> {
        self.load_or_default(RecordKey::Medications)
    }

    pub fn get_doctor_visits(&self) -> Vec<DoctorVisit> {
        self.load_or_default(RecordKey::DoctorVisits)
    }

    pub fn save_logs(&self, logs: &DailyLogs) {
        self.save_logged(RecordKey::Logs, logs);
    }

    pub fn save_medications(&self, medications: &[Medication]) {
        self.save_logged(RecordKey::Medications, medications);
    }

    pub fn save_doctor_visits(&self, visits: &[DoctorVisit]) {
        self.save_logged(RecordKey::DoctorVisits, visits);
    }

    pub fn try_save_logs(&self, logs: &DailyLogs) -> Result<(), StorageError> {
        self.write(RecordKey::Logs, logs)
    }

    pub fn try_save_medications(&self, medications: &[Medication]) -> Result<(), StorageError> {
        self.write(RecordKey::Medications, medications)
    }

    pub fn try_save_doctor_visits(&self, visits: &[DoctorVisit]) -> Result<(), StorageError> {
        self.write(RecordKey::DoctorVisits, visits)
    }

    /// Reads and decodes a record. `Ok(None)` means it was never written.
    pub fn load<T: DeserializeOwned>(&self, record: RecordKey) -> Result<Option<T>, StorageError> {
        let key = record.key();
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, record: RecordKey) -> T {
        match self.load(record) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::error!("Error reading {}, using empty default: {}", record.key(), e);
                T::default()
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, record: RecordKey, value: &T) -> Result<(), StorageError> {
        let key = record.key();
        let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &json)?;
        tracing::debug!("Saved {} ({} bytes)", key, json.len());
        Ok(())
    }

    fn save_logged<T: Serialize + ?Sized>(&self, record: RecordKey, value: &T) {
        if let Err(e) = self.write(record, value) {
            tracing::error!("Error saving {}: {}", record.key(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LogEntry, LogType};
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_empty_defaults() {
        let store = Store::new(MemoryStore::new());
        assert!(store.get_logs().is_empty());
        assert!(store.get_medications().is_empty());
        assert!(store.get_doctor_visits().is_empty());
    }

    #[test]
    fn test_save_and_get_each_record() {
        let store = Store::new(MemoryStore::new());

        let mut logs = DailyLogs::new();
        logs.add_entry("2024-01-01", LogEntry::new(LogType::Food, "Rice"));
        let meds = vec![Medication::new("Metoclopramide").with_dosage("5mg")];
        let visits = vec![DoctorVisit::new("2024-01-02", "Follow up")];

        store.save_logs(&logs);
        store.save_medications(&meds);
        store.save_doctor_visits(&visits);

        assert_eq!(store.get_logs(), logs);
        assert_eq!(store.get_medications(), meds);
        assert_eq!(store.get_doctor_visits(), visits);
    }

    #[test]
    fn test_corrupt_value_reads_as_empty() {
        let backend = MemoryStore::new();
        backend.set("medications", "{not json").unwrap();
        backend.set("dailyLogs", "[1, 2, 3]").unwrap();
        let store = Store::new(backend);

        assert!(store.get_medications().is_empty());
        assert!(store.get_logs().is_empty());
        assert!(matches!(
            store.load::<Vec<Medication>>(RecordKey::Medications),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let store = Store::new(MemoryStore::with_quota(64));
        let meds: Vec<Medication> = (0..10)
            .map(|i| Medication::new(format!("Medication number {}", i)))
            .collect();

        // Must not panic or propagate.
        store.save_medications(&meds);
        assert!(store.get_medications().is_empty());

        assert!(matches!(
            store.try_save_medications(&meds),
            Err(StorageError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn test_file_backed_store_persists_across_handles() {
        let temp_dir = TempDir::new().unwrap();
        let meds = vec![Medication::new("Domperidone").with_frequency("3x daily")];

        Store::new(FileStore::new(temp_dir.path().to_path_buf())).save_medications(&meds);

        let reopened = Store::new(FileStore::new(temp_dir.path().to_path_buf()));
        assert_eq!(reopened.get_medications(), meds);
    }
}
