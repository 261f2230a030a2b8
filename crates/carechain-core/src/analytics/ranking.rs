//! Top-N doctor rankings.

use serde::{Deserialize, Serialize};

use crate::models::Doctor;

/// A doctor's row in the performance ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPerformance {
    pub doctor_id: u64,
    pub name: String,
    pub specialization: Option<String>,
    pub appointment_count: u64,
    pub successful_treatments: u64,
    pub success_rate: u32,
}

impl From<&Doctor> for DoctorPerformance {
    fn from(doctor: &Doctor) -> Self {
        Self {
            doctor_id: doctor.id,
            name: doctor.name.clone(),
            specialization: doctor.specialization().map(str::to_string),
            appointment_count: doctor.appointment_count,
            successful_treatments: doctor.successful_treatment_count,
            success_rate: doctor.success_rate(),
        }
    }
}

/// The `n` best doctors: most successful treatments, then most
/// appointments, then highest success rate. Ties keep input order.
pub fn top_doctors(doctors: &[Doctor], n: usize) -> Vec<DoctorPerformance> {
    let mut ranked: Vec<DoctorPerformance> = doctors.iter().map(DoctorPerformance::from).collect();
    ranked.sort_by(|a, b| {
        b.successful_treatments
            .cmp(&a.successful_treatments)
            .then(b.appointment_count.cmp(&a.appointment_count))
            .then(b.success_rate.cmp(&a.success_rate))
    });
    ranked.truncate(n);
    ranked
}
