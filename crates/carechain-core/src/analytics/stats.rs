//! Aggregate counts and rates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{average, percentage, top_doctors, DoctorPerformance};
use crate::models::{Appointment, Doctor, Medicine, Patient, Urgency};

/// Appointment counts for a list of appointments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStats {
    pub total: usize,
    pub open: usize,
    pub completed: usize,
    /// completed / total, percent
    pub completion_rate: u32,
    pub emergency: usize,
    pub urgent: usize,
    pub normal: usize,
    /// emergency / total, percent
    pub emergency_rate: u32,
    /// Appointments dated today
    pub today: usize,
}

impl AppointmentStats {
    pub fn compute(appointments: &[Appointment], today: NaiveDate) -> Self {
        let mut stats = Self {
            total: appointments.len(),
            ..Default::default()
        };

        for appointment in appointments {
            if appointment.is_completed() {
                stats.completed += 1;
            } else {
                stats.open += 1;
            }
            match appointment.urgency() {
                Urgency::Emergency => stats.emergency += 1,
                Urgency::Urgent => stats.urgent += 1,
                Urgency::Normal => stats.normal += 1,
                Urgency::Other => {}
            }
            if appointment.calendar_date() == Some(today) {
                stats.today += 1;
            }
        }

        stats.completion_rate = percentage(stats.completed as u64, stats.total as u64);
        stats.emergency_rate = percentage(stats.emergency as u64, stats.total as u64);
        stats
    }
}

/// Doctor registry counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub approval_rate: u32,
    pub total_appointments: u64,
    pub total_successful_treatments: u64,
    /// Platform-wide successful treatments / appointments, percent
    pub success_rate: u32,
    /// Appointments per doctor, one decimal place
    pub average_appointments: f64,
}

impl DoctorStats {
    pub fn compute(doctors: &[Doctor]) -> Self {
        let approved = doctors.iter().filter(|d| d.is_approved()).count();
        let total_appointments: u64 = doctors.iter().map(|d| d.appointment_count).sum();
        let total_successful_treatments: u64 =
            doctors.iter().map(|d| d.successful_treatment_count).sum();

        Self {
            total: doctors.len(),
            approved,
            pending: doctors.len() - approved,
            approval_rate: percentage(approved as u64, doctors.len() as u64),
            total_appointments,
            total_successful_treatments,
            success_rate: percentage(total_successful_treatments, total_appointments),
            average_appointments: average(total_appointments, doctors.len()),
        }
    }
}

/// Patient registry counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    pub total: usize,
    /// Patients whose profile document was fetched
    pub with_profile: usize,
    /// Upper-cased blood type -> count; patients without one are not counted
    pub blood_types: BTreeMap<String, usize>,
}

impl PatientStats {
    pub fn compute(patients: &[Patient]) -> Self {
        let mut blood_types = BTreeMap::new();
        for blood_type in patients.iter().filter_map(|p| p.blood_type()) {
            *blood_types.entry(blood_type.to_uppercase()).or_insert(0) += 1;
        }

        Self {
            total: patients.len(),
            with_profile: patients.iter().filter(|p| p.profile.is_some()).count(),
            blood_types,
        }
    }
}

/// Medicine inventory counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineStats {
    pub total: usize,
    pub active: usize,
    /// Active medicines under the low-stock threshold
    pub low_stock: usize,
    pub inventory_value: f64,
}

impl MedicineStats {
    pub fn compute(medicines: &[Medicine], low_stock_threshold: u64) -> Self {
        let active: Vec<&Medicine> = medicines.iter().filter(|m| m.is_active).collect();
        Self {
            total: medicines.len(),
            active: active.len(),
            low_stock: active
                .iter()
                .filter(|m| m.is_low_stock(low_stock_threshold))
                .count(),
            inventory_value: active.iter().map(|m| m.stock_value()).sum(),
        }
    }
}

/// Entity totals for the admin header cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOverview {
    pub total_doctors: usize,
    pub total_patients: usize,
    pub total_appointments: usize,
    pub total_medicines: usize,
}

/// Inputs and knobs for [`PlatformAnalytics::compute`].
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsInput<'a> {
    pub doctors: &'a [Doctor],
    pub patients: &'a [Patient],
    pub medicines: &'a [Medicine],
    pub appointments: &'a [Appointment],
    pub today: NaiveDate,
    pub top_doctor_count: usize,
    pub low_stock_threshold: u64,
}

/// Everything the analytics screen shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalytics {
    pub overview: PlatformOverview,
    pub doctors: DoctorStats,
    pub appointments: AppointmentStats,
    pub patients: PatientStats,
    pub medicines: MedicineStats,
    pub top_doctors: Vec<DoctorPerformance>,
}

impl PlatformAnalytics {
    pub fn compute(input: AnalyticsInput<'_>) -> Self {
        Self {
            overview: PlatformOverview {
                total_doctors: input.doctors.len(),
                total_patients: input.patients.len(),
                total_appointments: input.appointments.len(),
                total_medicines: input.medicines.len(),
            },
            doctors: DoctorStats::compute(input.doctors),
            appointments: AppointmentStats::compute(input.appointments, input.today),
            patients: PatientStats::compute(input.patients),
            medicines: MedicineStats::compute(input.medicines, input.low_stock_threshold),
            top_doctors: top_doctors(input.doctors, input.top_doctor_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientProfile;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn appointment(id: u64, urgency: &str, is_open: bool, date: &str) -> Appointment {
        let mut a = Appointment::new(id, 1, 1, date);
        a.urgency = urgency.into();
        a.is_open = is_open;
        a
    }

    #[test]
    fn test_appointment_stats() {
        let appointments = vec![
            appointment(1, "Emergency", false, "2026-10-17"),
            appointment(2, "urgent", true, "2026-10-17"),
            appointment(3, "normal", false, "2026-10-01"),
            appointment(4, "", true, "bogus"),
        ];
        let stats = AppointmentStats::compute(&appointments, today());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.open, 2);
        assert_eq!(stats.completion_rate, 50);
        assert_eq!(stats.emergency, 1);
        assert_eq!(stats.urgent, 1);
        assert_eq!(stats.normal, 2);
        assert_eq!(stats.emergency_rate, 25);
        assert_eq!(stats.today, 2);
    }

    #[test]
    fn test_empty_lists_have_zero_rates() {
        let stats = AppointmentStats::compute(&[], today());
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.emergency_rate, 0);

        let doctors = DoctorStats::compute(&[]);
        assert_eq!(doctors.approval_rate, 0);
        assert_eq!(doctors.success_rate, 0);
        assert_eq!(doctors.average_appointments, 0.0);
    }

    #[test]
    fn test_doctor_stats() {
        let mut grey = Doctor::new(1, "Grey", "0x1");
        grey.status = "approved".into();
        grey.appointment_count = 10;
        grey.successful_treatment_count = 9;
        let mut shepherd = Doctor::new(2, "Shepherd", "0x2");
        shepherd.appointment_count = 5;
        shepherd.successful_treatment_count = 1;

        let stats = DoctorStats::compute(&[grey, shepherd]);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approval_rate, 50);
        assert_eq!(stats.total_appointments, 15);
        assert_eq!(stats.success_rate, 67);
        assert_eq!(stats.average_appointments, 7.5);
    }

    #[test]
    fn test_patient_blood_types() {
        let mut a = Patient::new(1, "A", "0x1");
        a.profile = Some(PatientProfile {
            blood_type: "o+".into(),
            ..Default::default()
        });
        let mut b = Patient::new(2, "B", "0x2");
        b.profile = Some(PatientProfile {
            blood_type: "O+".into(),
            ..Default::default()
        });
        let c = Patient::new(3, "C", "0x3");

        let stats = PatientStats::compute(&[a, b, c]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.with_profile, 2);
        assert_eq!(stats.blood_types.get("O+"), Some(&2));
    }

    #[test]
    fn test_medicine_stats_skip_inactive() {
        let medicines = vec![
            Medicine {
                id: 1,
                name: "Paracetamol".into(),
                description: String::new(),
                price: 1.0,
                quantity: 100,
                ipfs_hash: None,
                is_active: true,
            },
            Medicine {
                id: 2,
                name: "Insulin".into(),
                description: String::new(),
                price: 20.0,
                quantity: 3,
                ipfs_hash: None,
                is_active: true,
            },
            Medicine {
                id: 3,
                name: "Withdrawn".into(),
                description: String::new(),
                price: 5.0,
                quantity: 0,
                ipfs_hash: None,
                is_active: false,
            },
        ];
        let stats = MedicineStats::compute(&medicines, 10);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.inventory_value, 160.0);
    }
}
