//! Single-profile export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Doctor, HistoryEntry, Patient};

/// Whose profile is exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ProfileSubject {
    Doctor {
        doctor: Doctor,
        #[serde(rename = "successRate")]
        success_rate: u32,
    },
    Patient {
        patient: Patient,
        #[serde(rename = "medicalHistory")]
        medical_history: Vec<HistoryEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub generated_at: DateTime<Utc>,
    pub profile: ProfileSubject,
}

impl ProfileReport {
    pub fn doctor(doctor: Doctor) -> Self {
        Self {
            generated_at: Utc::now(),
            profile: ProfileSubject::Doctor {
                success_rate: doctor.success_rate(),
                doctor,
            },
        }
    }

    pub fn patient(patient: Patient, medical_history: Vec<HistoryEntry>) -> Self {
        Self {
            generated_at: Utc::now(),
            profile: ProfileSubject::Patient {
                patient,
                medical_history,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn file_name(&self) -> String {
        super::file_name("profile", &self.generated_at, "json")
    }
}
