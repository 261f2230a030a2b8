//! Medical history records.
//!
//! The contract stores a patient's history as a list of opaque strings. The
//! dashboard writes structured records as compact JSON; older or hand-written
//! entries are plain text and are kept as-is.

use serde::{Deserialize, Serialize};

use super::lenient;

/// A structured medical record entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalRecord {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub diagnosis: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub treatment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<u64>,
}

impl MedicalRecord {
    /// True when none of date, diagnosis or treatment is set.
    pub fn is_blank(&self) -> bool {
        self.date.trim().is_empty()
            && self.diagnosis.trim().is_empty()
            && self.treatment.trim().is_empty()
    }

    /// Serialize to the string stored on-chain.
    pub fn to_record_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One entry of a patient's medical history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entry", rename_all = "lowercase")]
pub enum HistoryEntry {
    Structured(MedicalRecord),
    Text(String),
}

impl HistoryEntry {
    /// Parse a stored history string. Only JSON objects carrying a date,
    /// diagnosis or treatment count as structured; anything else is kept
    /// verbatim as text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('{') {
            match serde_json::from_str::<MedicalRecord>(trimmed) {
                Ok(record) if !record.is_blank() => return HistoryEntry::Structured(record),
                _ => {}
            }
        }
        HistoryEntry::Text(raw.to_string())
    }

    /// One-line summary for lists.
    pub fn summary(&self) -> String {
        match self {
            HistoryEntry::Structured(record) if record.date.is_empty() => record.diagnosis.clone(),
            HistoryEntry::Structured(record) => format!("{}: {}", record.date, record.diagnosis),
            HistoryEntry::Text(text) => text.clone(),
        }
    }
}
