//! Patient dashboard: record, medical history, appointments.

use tracing::info;

use super::{Dashboard, Loaded};
use crate::contract::{ContractError, ContractResult};
use crate::export::ProfileReport;
use crate::models::{Appointment, HistoryEntry, MedicalRecord, Patient};

#[derive(Debug, Clone, PartialEq)]
pub struct PatientDashboard {
    pub patient: Patient,
    pub history: Vec<HistoryEntry>,
    pub appointments: Vec<Appointment>,
}

impl PatientDashboard {
    pub fn profile_report(&self) -> ProfileReport {
        ProfileReport::patient(self.patient.clone(), self.history.clone())
    }
}

impl<'a> Dashboard<'a> {
    /// Parsed medical history, oldest first.
    pub fn fetch_medical_history(&self, patient_id: u64) -> ContractResult<Vec<HistoryEntry>> {
        let raw = self.contract.get_patient_medical_history(patient_id)?;
        Ok(raw.iter().map(|entry| HistoryEntry::parse(entry)).collect())
    }

    fn fetch_patient_dashboard(&self, patient_id: u64) -> ContractResult<PatientDashboard> {
        let patient = self.enrich_patient(self.contract.get_patient_details(patient_id)?);
        let history = self.fetch_medical_history(patient_id)?;
        let appointments = self
            .contract
            .get_all_appointments()?
            .into_iter()
            .filter(|a| a.patient_id == patient_id)
            .collect();

        Ok(PatientDashboard {
            patient,
            history,
            appointments,
        })
    }

    pub fn load_patient_dashboard(&self, patient_id: u64) -> Loaded<Option<PatientDashboard>> {
        match self.fetch_patient_dashboard(patient_id) {
            Ok(dashboard) => Loaded::ok(Some(dashboard)),
            Err(e) => Loaded::fallback(None, "Failed to load patient data", e),
        }
    }

    /// Append a record to a patient's history, then re-fetch the history.
    pub fn add_medical_record(
        &self,
        patient_id: u64,
        record: &MedicalRecord,
    ) -> ContractResult<Vec<HistoryEntry>> {
        if record.is_blank() {
            return Err(ContractError::Rejected(
                "medical record needs a date, diagnosis or treatment".into(),
            ));
        }
        let stored = record.to_record_string()?;
        self.contract
            .update_patient_medical_history(patient_id, &stored)?;
        info!(patient_id, "Medical record added");
        self.fetch_medical_history(patient_id)
    }
}
