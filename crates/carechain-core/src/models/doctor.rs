//! Doctor models.

use serde::{Deserialize, Serialize};

use super::lenient;
use crate::analytics::percentage;

/// A doctor registered with the contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    /// Wallet address the doctor signs with
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub account_address: String,
    /// "approved" or "pending" (free-form, compared lower-cased)
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub appointment_count: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub successful_treatment_count: u64,
    /// Pointer to the extended profile document
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub ipfs_hash: Option<String>,
    /// Extended profile, once fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<DoctorProfile>,
}

impl Doctor {
    pub fn new(id: u64, name: impl Into<String>, account_address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            account_address: account_address.into(),
            status: "pending".to_string(),
            appointment_count: 0,
            successful_treatment_count: 0,
            ipfs_hash: None,
            profile: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("approved")
    }

    /// Successful treatments as a rounded percentage of appointments.
    /// A doctor with no appointments has a success rate of 0.
    pub fn success_rate(&self) -> u32 {
        percentage(self.successful_treatment_count, self.appointment_count)
    }

    /// Label shown for a doctor with no registry entry.
    pub fn placeholder_name(id: u64) -> String {
        format!("Doctor #{}", id)
    }

    /// Specialization from the profile, if one was fetched.
    pub fn specialization(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .map(|p| p.specialization.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Off-chain doctor profile document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorProfile {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub specialization: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub qualifications: Vec<String>,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub bio: String,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub experience_years: u32,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_rate_guards_zero_appointments() {
        let mut doctor = Doctor::new(1, "Dr. Grey", "0xabc");
        doctor.successful_treatment_count = 3;
        assert_eq!(doctor.success_rate(), 0);

        doctor.appointment_count = 8;
        assert_eq!(doctor.success_rate(), 38); // 37.5 rounds up
    }

    #[test]
    fn test_is_approved_ignores_case() {
        let mut doctor = Doctor::new(1, "Dr. Grey", "0xabc");
        assert!(!doctor.is_approved());
        doctor.status = " Approved".into();
        assert!(doctor.is_approved());
    }

    #[test]
    fn test_profile_decodes_partial_document() {
        let profile: DoctorProfile = serde_json::from_value(json!({
            "specialization": "Cardiology",
            "qualifications": "MBBS, MD",
            "contact": { "email": "grey@example.org" }
        }))
        .unwrap();

        assert_eq!(profile.specialization, "Cardiology");
        assert_eq!(profile.qualifications.len(), 2);
        assert_eq!(profile.contact.email, "grey@example.org");
        assert_eq!(profile.experience_years, 0);
    }
}
