//! Doctor dashboard: own record, appointments, and completion.

use tracing::{info, warn};

use super::{Dashboard, Loaded};
use crate::analytics::AppointmentStats;
use crate::contract::{ContractError, ContractResult};
use crate::export::ProfileReport;
use crate::models::{Appointment, Doctor};

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorDashboard {
    pub doctor: Doctor,
    pub appointments: Vec<Appointment>,
    pub stats: AppointmentStats,
}

impl DoctorDashboard {
    /// Appointments still waiting to be completed.
    pub fn open_appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter().filter(|a| a.is_open)
    }

    pub fn profile_report(&self) -> ProfileReport {
        ProfileReport::doctor(self.doctor.clone())
    }
}

impl<'a> Dashboard<'a> {
    fn fetch_doctor_dashboard(&self, address: &str) -> ContractResult<DoctorDashboard> {
        let doctor_id = self.contract.get_doctor_id(address)?;
        let doctor = self.enrich_doctor(self.contract.get_doctor_details(doctor_id)?);
        let appointments = self.contract.get_doctor_appointments(doctor_id)?;
        let stats = AppointmentStats::compute(&appointments, self.today());

        Ok(DoctorDashboard {
            doctor,
            appointments,
            stats,
        })
    }

    /// Dashboard for the doctor signed in with `address`; `None` on failure.
    pub fn load_doctor_dashboard(&self, address: &str) -> Loaded<Option<DoctorDashboard>> {
        match self.fetch_doctor_dashboard(address) {
            Ok(dashboard) => Loaded::ok(Some(dashboard)),
            Err(e) => Loaded::fallback(None, "Failed to load doctor dashboard", e),
        }
    }

    /// Complete one of the doctor's appointments, then re-fetch them.
    pub fn complete_appointment(
        &self,
        doctor_id: u64,
        appointment_id: u64,
    ) -> ContractResult<Vec<Appointment>> {
        let owned = self.contract.get_doctor_appointments(doctor_id)?;
        if !owned.iter().any(|a| a.id == appointment_id) {
            warn!(doctor_id, appointment_id, "Completion refused for another doctor's appointment");
            return Err(ContractError::Rejected(format!(
                "appointment {} does not belong to doctor {}",
                appointment_id, doctor_id
            )));
        }
        self.contract.complete_appointment(appointment_id)?;
        info!(doctor_id, appointment_id, "Appointment marked complete");
        self.contract.get_doctor_appointments(doctor_id)
    }
}
