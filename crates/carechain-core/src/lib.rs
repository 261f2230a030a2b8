//! CareChain Core Library
//!
//! Data layer for the CareChain healthcare dashboard. Admins, doctors and
//! patients see the same contract-owned data reshaped for their screen.
//!
//! # Architecture
//!
//! ```text
//!        HealthcareContract              ContentStore
//!   (appointments, registries)      (IPFS profile documents)
//!               │                            │
//!               └──────────┬─────────────────┘
//!                          ▼
//!                      Dashboard
//!          batch fetch → enrich profiles → derive
//!                          │
//!         ┌────────────────┼────────────────┐
//!         ▼                ▼                ▼
//!     analytics          query            export
//!  (counts, rates,   (search, filter,   (JSON / CSV
//!   top doctors)         sort)           downloads)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Display models for contract entities
//! - [`contract`]: Contract-access trait and the local SQLite ledger
//! - [`storage`]: Content-addressed storage trait and local store
//! - [`analytics`]: Derived statistics
//! - [`query`]: Search, filtering and sorting
//! - [`export`]: JSON and CSV exports
//! - [`dashboard`]: Screen-level orchestration
//! - [`db`]: SQLite layer behind the local ledger
//! - [`config`]: TOML configuration

pub mod analytics;
pub mod config;
pub mod contract;
pub mod dashboard;
pub mod db;
pub mod export;
pub mod models;
pub mod query;
pub mod storage;

// Re-export commonly used types
pub use analytics::{percentage, PlatformAnalytics};
pub use config::DashboardConfig;
pub use contract::{ContractError, HealthcareContract, LedgerContract};
pub use dashboard::{Dashboard, Loaded, Notice};
pub use db::Database;
pub use models::{
    Appointment, Doctor, HistoryEntry, MedicalRecord, Medicine, Notification, Patient, UserRole,
    UserType, Urgency,
};
pub use query::{AppointmentRow, DateBucket, ListQuery, SortKey};
pub use storage::{ContentStore, LocalContentStore, UploadPayload};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use db::{NewAppointment, NewMedicine};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum CareChainError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<db::DbError> for CareChainError {
    fn from(e: db::DbError) -> Self {
        CareChainError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for CareChainError {
    fn from(e: serde_json::Error) -> Self {
        CareChainError::SerializationError(e.to_string())
    }
}

impl From<ContractError> for CareChainError {
    fn from(e: ContractError) -> Self {
        match e {
            ContractError::NotFound(what) => CareChainError::NotFound(what),
            ContractError::Rejected(why) => CareChainError::Rejected(why),
            ContractError::Decode(why) => CareChainError::SerializationError(why),
            ContractError::Unavailable(why) => CareChainError::DatabaseError(why),
        }
    }
}

impl From<storage::StoreError> for CareChainError {
    fn from(e: storage::StoreError) -> Self {
        CareChainError::StorageError(e.to_string())
    }
}

impl From<config::ConfigError> for CareChainError {
    fn from(e: config::ConfigError) -> Self {
        CareChainError::InvalidInput(e.to_string())
    }
}

impl From<query::ParseQueryError> for CareChainError {
    fn from(e: query::ParseQueryError) -> Self {
        CareChainError::InvalidInput(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open the core with a TOML config (empty string for defaults).
/// Uses the configured database path, or an in-memory ledger if unset.
#[uniffi::export]
pub fn open_core(config_toml: String) -> Result<Arc<CareChainCore>, CareChainError> {
    let config = DashboardConfig::from_toml_str(&config_toml)?;
    let db = match &config.database_path {
        Some(path) => Database::open(path)?,
        None => Database::open_in_memory()?,
    };
    Ok(Arc::new(CareChainCore::new(db, config)))
}

/// Create an in-memory core with default config (for testing).
#[uniffi::export]
pub fn open_core_in_memory() -> Result<Arc<CareChainCore>, CareChainError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(CareChainCore::new(db, DashboardConfig::default())))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe local ledger, content store and dashboard for FFI.
#[derive(uniffi::Object)]
pub struct CareChainCore {
    ledger: LedgerContract,
    store: LocalContentStore,
    config: DashboardConfig,
}

impl CareChainCore {
    fn new(db: Database, config: DashboardConfig) -> Self {
        let db = Arc::new(Mutex::new(db));
        Self {
            ledger: LedgerContract::new(db.clone()),
            store: LocalContentStore::new(db, config.ipfs_gateway.clone()),
            config,
        }
    }

    fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(&self.ledger, &self.store, &self.config)
    }

    /// Upload an optional JSON profile document, returning its hash.
    fn upload_profile(&self, profile_json: Option<String>) -> Result<Option<String>, CareChainError> {
        match profile_json {
            Some(json) => {
                let value: serde_json::Value = serde_json::from_str(&json)?;
                if !value.is_object() {
                    return Err(CareChainError::InvalidInput(
                        "profile must be a JSON object".into(),
                    ));
                }
                Ok(Some(self.store.upload(&UploadPayload::Json(value))?))
            }
            None => Ok(None),
        }
    }
}

#[uniffi::export]
impl CareChainCore {
    // =========================================================================
    // Registry Operations
    // =========================================================================

    pub fn set_admin(&self, address: String) -> Result<(), CareChainError> {
        Ok(self.ledger.set_admin(&address)?)
    }

    /// Register a doctor, storing the profile document first if given.
    pub fn register_doctor(
        &self,
        address: String,
        name: String,
        profile_json: Option<String>,
    ) -> Result<u64, CareChainError> {
        let hash = self.upload_profile(profile_json)?;
        Ok(self
            .ledger
            .register_doctor(&address, &name, hash.as_deref())?)
    }

    pub fn approve_doctor(&self, doctor_id: u64) -> Result<(), CareChainError> {
        self.dashboard().approve_doctor(doctor_id)?;
        Ok(())
    }

    pub fn register_patient(
        &self,
        address: String,
        name: String,
        profile_json: Option<String>,
    ) -> Result<u64, CareChainError> {
        let hash = self.upload_profile(profile_json)?;
        Ok(self
            .ledger
            .register_patient(&address, &name, hash.as_deref())?)
    }

    pub fn add_medicine(&self, medicine: FfiMedicineInput) -> Result<u64, CareChainError> {
        if !medicine.price.is_finite() || medicine.price < 0.0 {
            return Err(CareChainError::InvalidInput(format!(
                "invalid price {}",
                medicine.price
            )));
        }
        Ok(self.ledger.add_medicine(&medicine.into())?)
    }

    /// Set a medicine's stock level.
    pub fn restock_medicine(&self, medicine_id: u64, quantity: u64) -> Result<(), CareChainError> {
        Ok(self.ledger.restock_medicine(medicine_id, quantity)?)
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    pub fn book_appointment(&self, request: FfiAppointmentRequest) -> Result<u64, CareChainError> {
        Ok(self.ledger.book_appointment(&request.into())?)
    }

    pub fn complete_appointment(
        &self,
        doctor_id: u64,
        appointment_id: u64,
    ) -> Result<Vec<FfiAppointment>, CareChainError> {
        let appointments = self
            .dashboard()
            .complete_appointment(doctor_id, appointment_id)?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// Appointments filtered and sorted for the list screen.
    pub fn list_appointments(
        &self,
        query: FfiListQuery,
    ) -> Result<Vec<FfiAppointmentRow>, CareChainError> {
        let query = ListQuery::try_from(query)?;
        let loaded = self.dashboard().load_appointment_rows(&query);
        if let Some(notice) = loaded.notice {
            return Err(CareChainError::DatabaseError(notice.detail));
        }
        Ok(loaded.data.into_iter().map(|r| r.into()).collect())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    pub fn add_medical_record(
        &self,
        patient_id: u64,
        record: FfiMedicalRecord,
    ) -> Result<Vec<String>, CareChainError> {
        let history = self
            .dashboard()
            .add_medical_record(patient_id, &record.into())?;
        Ok(history.iter().map(HistoryEntry::summary).collect())
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    pub fn user_type(&self, address: String) -> Result<FfiUserType, CareChainError> {
        let user = self.ledger.get_user_type(&address)?;
        Ok(user.into())
    }

    /// Notifications for an address, newest first.
    pub fn notifications(&self, address: String) -> Result<Vec<FfiNotification>, CareChainError> {
        let loaded = self.dashboard().load_notifications(&address);
        if let Some(notice) = loaded.notice {
            return Err(CareChainError::DatabaseError(notice.detail));
        }
        Ok(loaded.data.into_iter().map(|n| n.into()).collect())
    }

    // =========================================================================
    // Analytics & Export Operations
    // =========================================================================

    pub fn admin_overview(&self) -> Result<FfiPlatformOverview, CareChainError> {
        let loaded = self.dashboard().load_admin_overview();
        if let Some(notice) = loaded.notice {
            return Err(CareChainError::DatabaseError(notice.detail));
        }
        Ok((&loaded.data.analytics).into())
    }

    pub fn export_analytics_json(&self) -> Result<String, CareChainError> {
        let loaded = self.dashboard().load_admin_overview();
        if let Some(notice) = loaded.notice {
            return Err(CareChainError::DatabaseError(notice.detail));
        }
        Ok(loaded.data.analytics_report().to_json()?)
    }

    pub fn export_appointments_csv(&self, query: FfiListQuery) -> Result<String, CareChainError> {
        let query = ListQuery::try_from(query)?;
        let loaded = self.dashboard().appointment_report(&query);
        if let Some(notice) = loaded.notice {
            return Err(CareChainError::DatabaseError(notice.detail));
        }
        Ok(loaded.data.to_csv())
    }

    /// Gateway URL for a stored profile pointer.
    pub fn profile_url(&self, pointer: String) -> Result<String, CareChainError> {
        Ok(self.store.url(&pointer)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe medicine input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicineInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u64,
}

impl From<FfiMedicineInput> for NewMedicine {
    fn from(input: FfiMedicineInput) -> Self {
        NewMedicine {
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
            ipfs_hash: None,
        }
    }
}

/// FFI-safe booking request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentRequest {
    pub doctor_id: u64,
    pub patient_id: u64,
    pub appointment_date: String,
    pub time_from: String,
    pub time_to: String,
    pub condition: String,
    pub message: String,
    pub urgency: String,
}

impl From<FfiAppointmentRequest> for NewAppointment {
    fn from(request: FfiAppointmentRequest) -> Self {
        NewAppointment {
            doctor_id: request.doctor_id,
            patient_id: request.patient_id,
            appointment_date: request.appointment_date,
            from: request.time_from,
            to: request.time_to,
            condition: request.condition,
            message: request.message,
            urgency: request.urgency,
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: u64,
    pub doctor_id: u64,
    pub patient_id: u64,
    pub appointment_date: String,
    pub time_range: String,
    pub condition: String,
    pub urgency: String,
    pub status: String,
    pub is_open: bool,
}

impl From<Appointment> for FfiAppointment {
    fn from(a: Appointment) -> Self {
        Self {
            time_range: a.time_range(),
            urgency: a.urgency_label(),
            status: a.status_label(),
            id: a.id,
            doctor_id: a.doctor_id,
            patient_id: a.patient_id,
            appointment_date: a.appointment_date,
            condition: a.condition,
            is_open: a.is_open,
        }
    }
}

/// FFI-safe appointment list row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentRow {
    pub appointment: FfiAppointment,
    pub doctor_name: String,
    pub patient_name: String,
}

impl From<AppointmentRow> for FfiAppointmentRow {
    fn from(row: AppointmentRow) -> Self {
        Self {
            appointment: row.appointment.into(),
            doctor_name: row.doctor_name,
            patient_name: row.patient_name,
        }
    }
}

/// FFI-safe list query. Blank strings mean "no filter".
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiListQuery {
    pub search: String,
    pub status: String,
    pub urgency: String,
    pub date: String,
    pub sort: Option<String>,
}

impl TryFrom<FfiListQuery> for ListQuery {
    type Error = query::ParseQueryError;

    fn try_from(q: FfiListQuery) -> Result<Self, Self::Error> {
        let mut query = ListQuery::new()
            .search(q.search)
            .status(&q.status)
            .urgency(&q.urgency)
            .date(q.date.parse()?);
        if let Some(sort) = q.sort.filter(|s| !s.trim().is_empty()) {
            query = query.sort(sort.parse()?);
        }
        Ok(query)
    }
}

/// FFI-safe medical record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalRecord {
    pub date: String,
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub doctor_id: Option<u64>,
}

impl From<FfiMedicalRecord> for MedicalRecord {
    fn from(r: FfiMedicalRecord) -> Self {
        MedicalRecord {
            date: r.date,
            diagnosis: r.diagnosis,
            treatment: r.treatment,
            prescription: r.prescription,
            notes: r.notes,
            doctor_id: r.doctor_id,
        }
    }
}

/// FFI-safe user type.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUserType {
    pub user_type: String,
    pub name: String,
}

impl From<UserType> for FfiUserType {
    fn from(user: UserType) -> Self {
        Self {
            user_type: user.user_type.as_str().to_string(),
            name: user.name,
        }
    }
}

/// FFI-safe notification.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotification {
    pub message: String,
    pub category_type: String,
    pub timestamp: u64,
}

impl From<Notification> for FfiNotification {
    fn from(n: Notification) -> Self {
        Self {
            message: n.message,
            category_type: n.category_type,
            timestamp: n.timestamp,
        }
    }
}

/// FFI-safe headline analytics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPlatformOverview {
    pub total_doctors: u64,
    pub total_patients: u64,
    pub total_appointments: u64,
    pub total_medicines: u64,
    pub approved_doctors: u64,
    pub pending_doctors: u64,
    pub completion_rate: u32,
    pub emergency_rate: u32,
    pub success_rate: u32,
    pub low_stock_medicines: u64,
}

impl From<&PlatformAnalytics> for FfiPlatformOverview {
    fn from(a: &PlatformAnalytics) -> Self {
        Self {
            total_doctors: a.overview.total_doctors as u64,
            total_patients: a.overview.total_patients as u64,
            total_appointments: a.overview.total_appointments as u64,
            total_medicines: a.overview.total_medicines as u64,
            approved_doctors: a.doctors.approved as u64,
            pending_doctors: a.doctors.pending as u64,
            completion_rate: a.appointments.completion_rate,
            emergency_rate: a.appointments.emergency_rate,
            success_rate: a.doctors.success_rate,
            low_stock_medicines: a.medicines.low_stock as u64,
        }
    }
}
