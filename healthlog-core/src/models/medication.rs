use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}

impl Medication {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            dosage: String::new(),
            frequency: String::new(),
        }
    }

    pub fn with_dosage(mut self, dosage: impl Into<String>) -> Self {
        self.dosage = dosage.into();
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = frequency.into();
        self
    }
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.dosage.is_empty() {
            write!(f, " {}", self.dosage)?;
        }
        if !self.frequency.is_empty() {
            write!(f, " ({})", self.frequency)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medication_builder() {
        let med = Medication::new("Prucalopride")
            .with_dosage("2mg")
            .with_frequency("Daily");

        assert!(!med.id.is_empty());
        assert_eq!(med.name, "Prucalopride");
        assert_eq!(med.dosage, "2mg");
        assert_eq!(med.frequency, "Daily");
    }

    #[test]
    fn test_medication_display() {
        let med = Medication::new("Ondansetron").with_dosage("4mg");
        assert_eq!(format!("{}", med), "Ondansetron 4mg");

        let med = med.with_frequency("As needed");
        assert_eq!(format!("{}", med), "Ondansetron 4mg (As needed)");
    }

    #[test]
    fn test_medication_json_field_names() {
        let json = r#"{"id":"1700000000000","name":"Domperidone","dosage":"10mg","frequency":"3x daily"}"#;
        let med: Medication = serde_json::from_str(json).unwrap();
        assert_eq!(med.id, "1700000000000");
        assert_eq!(med.frequency, "3x daily");
    }
}
