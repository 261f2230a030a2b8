//! Account-level models: roles, notifications, contract metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Role an address holds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Doctor,
    Patient,
    #[serde(other)]
    Unregistered,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Doctor => "doctor",
            UserRole::Patient => "patient",
            UserRole::Unregistered => "unregistered",
        }
    }
}

/// Result of the contract's user-type lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserType {
    pub user_type: UserRole,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
}

impl UserType {
    pub fn unregistered() -> Self {
        Self {
            user_type: UserRole::Unregistered,
            name: String::new(),
        }
    }
}

/// A notification addressed to one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub message: String,
    /// e.g. "appointment", "record", "approval"
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub category_type: String,
    /// Unix seconds
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub timestamp: u64,
}

impl Notification {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Contract-wide settings and counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractInfo {
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub appointment_fee: u64,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub admin: String,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub doctor_count: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub patient_count: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub medicine_count: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub appointment_count: u64,
}
