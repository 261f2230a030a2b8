//! Appointment models.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::lenient;

/// An appointment as stored by the contract.
///
/// `is_open` flips from `true` to `false` exactly once, when the doctor
/// completes the appointment. The contract enforces that; this type only
/// reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub doctor_id: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub patient_id: u64,
    /// Calendar date as the contract stores it (ISO date, RFC 3339, or unix seconds)
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub appointment_date: String,
    /// Start of the time slot, e.g. "09:30"
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub from: String,
    /// End of the time slot
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub to: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub condition: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub message: String,
    /// Free-form urgency ("Emergency", "urgent", ...)
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub urgency: String,
    /// Free-form status
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub status: String,
    #[serde(default = "open_by_default", deserialize_with = "lenient::flag")]
    pub is_open: bool,
}

fn open_by_default() -> bool {
    true
}

impl Appointment {
    /// Create an open appointment with the required fields.
    pub fn new(id: u64, doctor_id: u64, patient_id: u64, appointment_date: impl Into<String>) -> Self {
        Self {
            id,
            doctor_id,
            patient_id,
            appointment_date: appointment_date.into(),
            from: String::new(),
            to: String::new(),
            condition: String::new(),
            message: String::new(),
            urgency: Urgency::Normal.as_str().to_string(),
            status: "pending".to_string(),
            is_open: true,
        }
    }

    pub fn is_completed(&self) -> bool {
        !self.is_open
    }

    /// Status for display and filtering. A closed appointment is always
    /// "completed" regardless of what the status string says.
    pub fn status_label(&self) -> String {
        if self.is_completed() {
            return "completed".to_string();
        }
        let status = self.status.trim().to_lowercase();
        if status.is_empty() {
            "pending".to_string()
        } else {
            status
        }
    }

    pub fn urgency(&self) -> Urgency {
        Urgency::parse(&self.urgency)
    }

    /// Lower-cased urgency; blank counts as "normal".
    pub fn urgency_label(&self) -> String {
        let urgency = self.urgency.trim().to_lowercase();
        if urgency.is_empty() {
            Urgency::Normal.as_str().to_string()
        } else {
            urgency
        }
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.appointment_date)
    }

    /// "09:00 - 09:30", or whichever half is known.
    pub fn time_range(&self) -> String {
        match (self.from.trim(), self.to.trim()) {
            ("", "") => String::new(),
            (from, "") => from.to_string(),
            ("", to) => to.to_string(),
            (from, to) => format!("{} - {}", from, to),
        }
    }
}

/// Urgency levels with a fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Emergency,
    Urgent,
    Normal,
    /// Anything the contract sent that is not one of the above
    Other,
}

impl Urgency {
    /// Case-insensitive parse. Blank is `Normal`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "emergency" => Urgency::Emergency,
            "urgent" => Urgency::Urgent,
            "normal" | "" => Urgency::Normal,
            _ => Urgency::Other,
        }
    }

    /// Sort rank: emergency first, unknown last.
    pub fn rank(self) -> u8 {
        match self {
            Urgency::Emergency => 0,
            Urgency::Urgent => 1,
            Urgency::Normal => 2,
            Urgency::Other => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Emergency => "emergency",
            Urgency::Urgent => "urgent",
            Urgency::Normal => "normal",
            Urgency::Other => "other",
        }
    }
}

/// Parse the date formats seen in appointment records.
///
/// Accepts `YYYY-MM-DD`, `YYYYMMDD`, RFC 3339 timestamps, `YYYY-MM-DDTHH:MM`
/// (HTML datetime inputs), and unix timestamps in seconds or milliseconds.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    // Compact `YYYYMMDD` before treating digits as a timestamp
    if raw.len() == 8 {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y%m%d") {
            return Some(date);
        }
    }

    if raw.chars().all(|c| c.is_ascii_digit()) {
        let n: i64 = raw.parse().ok()?;
        // Anything past the year 5138 in seconds is really milliseconds
        let dt = if n > 100_000_000_000 {
            DateTime::from_timestamp_millis(n)?
        } else {
            DateTime::from_timestamp(n, 0)?
        };
        return Some(dt.date_naive());
    }

    None
}
