//! Patient models.

use serde::{Deserialize, Serialize};

use super::lenient;

/// A patient registered with the contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub account_address: String,
    /// On-chain display name; the profile may carry a fuller one
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub ipfs_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PatientProfile>,
}

impl Patient {
    pub fn new(id: u64, name: impl Into<String>, account_address: impl Into<String>) -> Self {
        Self {
            id,
            account_address: account_address.into(),
            name: name.into(),
            ipfs_hash: None,
            profile: None,
        }
    }

    /// Profile name, then on-chain name; `None` if neither is set.
    pub fn known_name(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .map(|p| p.name.trim())
            .filter(|n| !n.is_empty())
            .or_else(|| Some(self.name.trim()).filter(|n| !n.is_empty()))
    }

    /// Best available name, falling back to "Patient #id".
    pub fn display_name(&self) -> String {
        match self.known_name() {
            Some(name) => name.to_string(),
            None => Self::placeholder_name(self.id),
        }
    }

    /// Label shown for a patient with no known name.
    pub fn placeholder_name(id: u64) -> String {
        format!("Patient #{}", id)
    }

    pub fn blood_type(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .map(|p| p.blood_type.trim())
            .filter(|b| !b.is_empty())
    }
}

/// Off-chain patient profile document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientProfile {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(deserialize_with = "lenient::u32_or_zero")]
    pub age: u32,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub blood_type: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub allergies: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub medications: Vec<String>,
    pub emergency_contact: Option<EmergencyContact>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyContact {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub relationship: String,
}
