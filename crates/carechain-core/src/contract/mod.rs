//! Contract-access boundary.
//!
//! Every on-chain read and write the dashboard issues goes through
//! [`HealthcareContract`]. The production binding lives outside this crate;
//! [`LedgerContract`] is a local SQLite-backed implementation used for
//! offline development and tests.

mod ledger;

pub use ledger::*;

use thiserror::Error;

use crate::db::DbError;
use crate::models::{
    Appointment, ContractInfo, Doctor, Medicine, Notification, Patient, UserType,
};

/// Contract-access errors.
#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected by contract: {0}")]
    Rejected(String),

    #[error("Malformed contract response: {0}")]
    Decode(String),

    #[error("Contract unavailable: {0}")]
    Unavailable(String),
}

pub type ContractResult<T> = Result<T, ContractError>;

impl From<DbError> for ContractError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) => ContractError::NotFound(what),
            DbError::Constraint(why) => ContractError::Rejected(why),
            DbError::Json(e) => ContractError::Decode(e.to_string()),
            DbError::Sqlite(e) => ContractError::Unavailable(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(e: serde_json::Error) -> Self {
        ContractError::Decode(e.to_string())
    }
}

/// The contract surface the dashboard depends on.
///
/// Implementations must be shareable across threads: the dashboard issues
/// independent reads concurrently.
pub trait HealthcareContract: Send + Sync {
    fn get_contract_info(&self) -> ContractResult<ContractInfo>;

    fn get_all_doctors(&self) -> ContractResult<Vec<Doctor>>;

    fn get_all_patients(&self) -> ContractResult<Vec<Patient>>;

    fn get_all_medicines(&self) -> ContractResult<Vec<Medicine>>;

    fn get_all_appointments(&self) -> ContractResult<Vec<Appointment>>;

    /// Doctor id registered to a wallet address.
    fn get_doctor_id(&self, address: &str) -> ContractResult<u64>;

    fn get_doctor_details(&self, doctor_id: u64) -> ContractResult<Doctor>;

    fn get_doctor_appointments(&self, doctor_id: u64) -> ContractResult<Vec<Appointment>>;

    fn get_patient_details(&self, patient_id: u64) -> ContractResult<Patient>;

    /// Raw history entries, oldest first.
    fn get_patient_medical_history(&self, patient_id: u64) -> ContractResult<Vec<String>>;

    /// Close an open appointment. Fails if it is already closed.
    fn complete_appointment(&self, appointment_id: u64) -> ContractResult<()>;

    fn update_patient_medical_history(&self, patient_id: u64, record: &str) -> ContractResult<()>;

    fn approve_doctor(&self, doctor_id: u64) -> ContractResult<()>;

    fn get_user_type(&self, address: &str) -> ContractResult<UserType>;

    fn get_notifications(&self, address: &str) -> ContractResult<Vec<Notification>>;
}
