//! Screen-level orchestration.
//!
//! Each load follows the same pattern: fetch from the contract, optionally
//! dereference profile pointers, derive aggregates. Load failures are
//! logged and reported as a generic [`Notice`] next to an empty fallback;
//! nothing is retried. Actions (complete, add record, approve) return their
//! error so the caller can surface it, then re-fetch on success.

mod admin;
mod appointments;
mod doctor;
mod patient;
mod session;

pub use admin::*;
pub use doctor::*;
pub use patient::*;
pub use session::*;

use std::fmt::Display;
use std::thread::ScopedJoinHandle;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::config::DashboardConfig;
use crate::contract::{ContractError, ContractResult, HealthcareContract};
use crate::models::{Doctor, DoctorProfile, Patient, PatientProfile};
use crate::storage::{fetch_document, ContentStore};

/// User-facing message shown when a load fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Generic text for the toast
    pub message: String,
    /// Underlying error, for logs and tooltips
    pub detail: String,
}

/// Result of a screen load: data (possibly a fallback) plus an optional notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub notice: Option<Notice>,
}

impl<T> Loaded<T> {
    pub fn ok(data: T) -> Self {
        Self { data, notice: None }
    }

    /// Log the failure and fall back to `data`.
    pub fn fallback(data: T, message: &str, err: impl Display) -> Self {
        error!(error = %err, "{}", message);
        Self {
            data,
            notice: Some(Notice {
                message: message.to_string(),
                detail: err.to_string(),
            }),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.notice.is_none()
    }
}

/// Dashboard over a contract binding and a content store.
pub struct Dashboard<'a> {
    contract: &'a dyn HealthcareContract,
    store: &'a dyn ContentStore,
    config: &'a DashboardConfig,
    today: Option<NaiveDate>,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        contract: &'a dyn HealthcareContract,
        store: &'a dyn ContentStore,
        config: &'a DashboardConfig,
    ) -> Self {
        Self {
            contract,
            store,
            config,
            today: None,
        }
    }

    /// Pin "today" instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn config(&self) -> &DashboardConfig {
        self.config
    }

    /// Fetch a doctor's profile document if it has a pointer and none is
    /// loaded yet. Failures leave the profile empty.
    pub fn enrich_doctor(&self, mut doctor: Doctor) -> Doctor {
        if doctor.profile.is_some() {
            return doctor;
        }
        if let Some(pointer) = doctor.ipfs_hash.as_deref() {
            match fetch_document::<DoctorProfile>(self.store, pointer) {
                Ok(profile) => doctor.profile = Some(profile),
                Err(e) => warn!(doctor_id = doctor.id, error = %e, "Doctor profile unavailable"),
            }
        }
        doctor
    }

    pub fn enrich_patient(&self, mut patient: Patient) -> Patient {
        if patient.profile.is_some() {
            return patient;
        }
        if let Some(pointer) = patient.ipfs_hash.as_deref() {
            match fetch_document::<PatientProfile>(self.store, pointer) {
                Ok(profile) => patient.profile = Some(profile),
                Err(e) => warn!(patient_id = patient.id, error = %e, "Patient profile unavailable"),
            }
        }
        patient
    }
}

/// Join a batch worker, turning a panic into a contract error.
fn join_fetch<T>(handle: ScopedJoinHandle<'_, ContractResult<T>>) -> ContractResult<T> {
    handle
        .join()
        .map_err(|_| ContractError::Unavailable("fetch worker panicked".into()))?
}
