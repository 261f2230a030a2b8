//! Appointments joined with the names of the people involved.

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Queryable;
use crate::models::{Appointment, Doctor, Patient, Urgency};

/// An appointment with doctor and patient names resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRow {
    pub appointment: Appointment,
    pub doctor_name: String,
    pub patient_name: String,
}

/// Attach doctor and patient names to each appointment.
///
/// Ids with no registry entry fall back to "Doctor #id" / "Patient #id".
pub fn join_appointments(
    appointments: &[Appointment],
    doctors: &[Doctor],
    patients: &[Patient],
) -> Vec<AppointmentRow> {
    let doctor_names: HashMap<u64, &str> = doctors
        .iter()
        .map(|d| (d.id, d.name.trim()))
        .filter(|(_, name)| !name.is_empty())
        .collect();
    let patient_names: HashMap<u64, &str> = patients
        .iter()
        .filter_map(|p| p.known_name().map(|name| (p.id, name)))
        .collect();

    appointments
        .iter()
        .map(|appointment| AppointmentRow {
            doctor_name: doctor_names
                .get(&appointment.doctor_id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| Doctor::placeholder_name(appointment.doctor_id)),
            patient_name: patient_names
                .get(&appointment.patient_id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| Patient::placeholder_name(appointment.patient_id)),
            appointment: appointment.clone(),
        })
        .collect()
}

impl AppointmentRow {
    /// Doctor name, unless it is the "Doctor #id" placeholder.
    pub fn known_doctor_name(&self) -> Option<&str> {
        (self.doctor_name != Doctor::placeholder_name(self.appointment.doctor_id))
            .then_some(self.doctor_name.as_str())
    }

    /// Patient name, unless it is the "Patient #id" placeholder.
    pub fn known_patient_name(&self) -> Option<&str> {
        (self.patient_name != Patient::placeholder_name(self.appointment.patient_id))
            .then_some(self.patient_name.as_str())
    }
}

impl Queryable for AppointmentRow {
    fn id_key(&self) -> String {
        self.appointment.id.to_string()
    }

    /// Placeholder names carry other entities' ids and are not searched.
    fn text_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = self.appointment.text_fields();
        fields.extend(self.known_doctor_name().map(Cow::Borrowed));
        fields.extend(self.known_patient_name().map(Cow::Borrowed));
        fields
    }

    fn sort_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.patient_name.as_str())
    }

    fn status_label(&self) -> Option<String> {
        Some(self.appointment.status_label())
    }

    fn urgency(&self) -> Option<Urgency> {
        Some(self.appointment.urgency())
    }

    fn calendar_date(&self) -> Option<NaiveDate> {
        self.appointment.calendar_date()
    }
}
