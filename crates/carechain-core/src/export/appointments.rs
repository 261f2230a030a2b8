//! Appointment list export.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::analytics::AppointmentStats;
use crate::query::AppointmentRow;

/// Appointment list with its summary counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReport {
    pub generated_at: DateTime<Utc>,
    pub summary: AppointmentStats,
    pub appointments: Vec<AppointmentRow>,
}

impl AppointmentReport {
    pub fn new(rows: Vec<AppointmentRow>, today: NaiveDate) -> Self {
        let appointments: Vec<_> = rows.iter().map(|r| r.appointment.clone()).collect();
        Self {
            generated_at: Utc::now(),
            summary: AppointmentStats::compute(&appointments, today),
            appointments: rows,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// One line per appointment.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("id,date,time,doctor,patient,condition,urgency,status\n");

        for row in &self.appointments {
            let a = &row.appointment;
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                a.id,
                escape_csv(&a.appointment_date),
                escape_csv(&a.time_range()),
                escape_csv(&row.doctor_name),
                escape_csv(&row.patient_name),
                escape_csv(&a.condition),
                escape_csv(&a.urgency_label()),
                escape_csv(&a.status_label()),
            ));
        }

        csv
    }

    pub fn file_name(&self, extension: &str) -> String {
        super::file_name("appointments", &self.generated_at, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, Doctor, Patient};
    use crate::query::join_appointments;

    fn rows() -> Vec<AppointmentRow> {
        let mut first = Appointment::new(1, 1, 1, "2026-10-17");
        first.condition = "Fever, chills".into();
        first.urgency = "Urgent".into();
        let mut second = Appointment::new(2, 1, 1, "2026-10-16");
        second.is_open = false;

        join_appointments(
            &[first, second],
            &[Doctor::new(1, "Dr. Grey", "0x1")],
            &[Patient::new(1, "Alex", "0x2")],
        )
    }

    #[test]
    fn test_appointment_csv() {
        let report = AppointmentReport::new(rows(), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        let csv = report.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3); // Header + 2 rows
        assert!(lines[0].starts_with("id,date"));
        assert_eq!(lines[1], "1,2026-10-17,,Dr. Grey,Alex,\"Fever, chills\",urgent,pending");
        assert!(lines[2].ends_with(",normal,completed"));
    }

    #[test]
    fn test_appointment_json_summary() {
        let report = AppointmentReport::new(rows(), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["completionRate"], 50);
        assert_eq!(value["appointments"][0]["doctorName"], "Dr. Grey");
        assert!(report.file_name("csv").ends_with(".csv"));
    }
}
