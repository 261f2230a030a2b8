//! SQLite-backed ledger implementing the contract surface.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use super::{ContractError, ContractResult, HealthcareContract};
use crate::db::{Database, DbResult, NewAppointment, NewMedicine};
use crate::models::{
    Appointment, ContractInfo, Doctor, Medicine, Notification, Patient, UserRole, UserType,
};

impl<T> From<PoisonError<T>> for ContractError {
    fn from(e: PoisonError<T>) -> Self {
        ContractError::Unavailable(format!("Lock poisoned: {}", e))
    }
}

/// Local ledger with the same rules the on-chain contract applies:
/// only approved doctors take bookings, appointments close exactly once,
/// and every state change notifies the accounts involved.
#[derive(Clone)]
pub struct LedgerContract {
    db: Arc<Mutex<Database>>,
}

impl LedgerContract {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Ledger over a fresh in-memory database.
    pub fn open_in_memory() -> ContractResult<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self::new(Arc::new(Mutex::new(db))))
    }

    fn with_db<T>(&self, f: impl FnOnce(&Database) -> DbResult<T>) -> ContractResult<T> {
        let db = self.db.lock()?;
        Ok(f(&*db)?)
    }

    fn now() -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
    }

    pub fn set_admin(&self, address: &str) -> ContractResult<()> {
        self.with_db(|db| db.set_admin_address(address))
    }

    pub fn set_appointment_fee(&self, fee: u64) -> ContractResult<()> {
        self.with_db(|db| db.set_appointment_fee(fee))
    }

    /// Register a doctor pending admin approval.
    pub fn register_doctor(
        &self,
        address: &str,
        name: &str,
        ipfs_hash: Option<&str>,
    ) -> ContractResult<u64> {
        let id = self.with_db(|db| {
            let id = db.register_doctor(address, name, ipfs_hash)?;
            db.push_notification(
                address,
                "Registration received; awaiting admin approval",
                "account",
                Self::now(),
            )?;
            Ok(id)
        })?;
        info!(doctor_id = id, %address, "Doctor registered");
        Ok(id)
    }

    pub fn register_patient(
        &self,
        address: &str,
        name: &str,
        ipfs_hash: Option<&str>,
    ) -> ContractResult<u64> {
        let id = self.with_db(|db| {
            let id = db.register_patient(address, name, ipfs_hash)?;
            db.push_notification(address, "Welcome to CareChain", "account", Self::now())?;
            Ok(id)
        })?;
        info!(patient_id = id, %address, "Patient registered");
        Ok(id)
    }

    pub fn add_medicine(&self, medicine: &NewMedicine) -> ContractResult<u64> {
        let id = self.with_db(|db| db.add_medicine(medicine))?;
        info!(medicine_id = id, name = %medicine.name, "Medicine added");
        Ok(id)
    }

    /// Set a medicine's stock level.
    pub fn restock_medicine(&self, medicine_id: u64, quantity: u64) -> ContractResult<()> {
        if !self.with_db(|db| db.set_medicine_quantity(medicine_id, quantity))? {
            return Err(ContractError::NotFound(format!("medicine {}", medicine_id)));
        }
        info!(medicine_id, quantity, "Medicine restocked");
        Ok(())
    }

    /// Book an appointment and notify both parties.
    pub fn book_appointment(&self, request: &NewAppointment) -> ContractResult<u64> {
        let id = self.with_db(|db| {
            let id = db.book_appointment(request)?;
            let doctor = db.get_doctor(request.doctor_id)?;
            let patient = db.get_patient(request.patient_id)?;
            let now = Self::now();
            if let Some(doctor) = doctor {
                db.push_notification(
                    &doctor.account_address,
                    &format!(
                        "New appointment #{} on {}",
                        id, request.appointment_date
                    ),
                    "appointment",
                    now,
                )?;
            }
            if let Some(patient) = patient {
                db.push_notification(
                    &patient.account_address,
                    &format!("Appointment #{} booked for {}", id, request.appointment_date),
                    "appointment",
                    now,
                )?;
            }
            Ok(id)
        })?;
        info!(
            appointment_id = id,
            doctor_id = request.doctor_id,
            patient_id = request.patient_id,
            "Appointment booked"
        );
        Ok(id)
    }

    pub fn push_notification(
        &self,
        address: &str,
        message: &str,
        category_type: &str,
    ) -> ContractResult<()> {
        self.with_db(|db| db.push_notification(address, message, category_type, Self::now()))
    }
}

impl HealthcareContract for LedgerContract {
    fn get_contract_info(&self) -> ContractResult<ContractInfo> {
        self.with_db(|db| {
            let (doctor_count, patient_count, medicine_count, appointment_count) =
                db.entity_counts()?;
            Ok(ContractInfo {
                appointment_fee: db.appointment_fee()?,
                admin: db.admin_address()?,
                doctor_count,
                patient_count,
                medicine_count,
                appointment_count,
            })
        })
    }

    fn get_all_doctors(&self) -> ContractResult<Vec<Doctor>> {
        self.with_db(|db| db.list_doctors())
    }

    fn get_all_patients(&self) -> ContractResult<Vec<Patient>> {
        self.with_db(|db| db.list_patients())
    }

    fn get_all_medicines(&self) -> ContractResult<Vec<Medicine>> {
        self.with_db(|db| db.list_medicines())
    }

    fn get_all_appointments(&self) -> ContractResult<Vec<Appointment>> {
        self.with_db(|db| db.list_appointments())
    }

    fn get_doctor_id(&self, address: &str) -> ContractResult<u64> {
        self.with_db(|db| db.get_doctor_by_address(address))?
            .map(|doctor| doctor.id)
            .ok_or_else(|| ContractError::NotFound(format!("doctor with address {}", address)))
    }

    fn get_doctor_details(&self, doctor_id: u64) -> ContractResult<Doctor> {
        self.with_db(|db| db.get_doctor(doctor_id))?
            .ok_or_else(|| ContractError::NotFound(format!("doctor {}", doctor_id)))
    }

    fn get_doctor_appointments(&self, doctor_id: u64) -> ContractResult<Vec<Appointment>> {
        self.get_doctor_details(doctor_id)?;
        self.with_db(|db| db.list_doctor_appointments(doctor_id))
    }

    fn get_patient_details(&self, patient_id: u64) -> ContractResult<Patient> {
        self.with_db(|db| db.get_patient(patient_id))?
            .ok_or_else(|| ContractError::NotFound(format!("patient {}", patient_id)))
    }

    fn get_patient_medical_history(&self, patient_id: u64) -> ContractResult<Vec<String>> {
        self.with_db(|db| db.medical_history(patient_id))
    }

    fn complete_appointment(&self, appointment_id: u64) -> ContractResult<()> {
        self.with_db(|db| {
            let appointment = db.complete_appointment(appointment_id)?;
            if let Some(patient) = db.get_patient(appointment.patient_id)? {
                db.push_notification(
                    &patient.account_address,
                    &format!("Appointment #{} completed", appointment_id),
                    "appointment",
                    Self::now(),
                )?;
            }
            Ok(())
        })?;
        info!(appointment_id, "Appointment completed");
        Ok(())
    }

    fn update_patient_medical_history(&self, patient_id: u64, record: &str) -> ContractResult<()> {
        self.with_db(|db| {
            db.append_medical_record(patient_id, record)?;
            if let Some(patient) = db.get_patient(patient_id)? {
                db.push_notification(
                    &patient.account_address,
                    "A new medical record was added",
                    "record",
                    Self::now(),
                )?;
            }
            Ok(())
        })?;
        debug!(patient_id, bytes = record.len(), "Medical history updated");
        Ok(())
    }

    fn approve_doctor(&self, doctor_id: u64) -> ContractResult<()> {
        self.with_db(|db| {
            if db.approve_doctor(doctor_id)? {
                if let Some(doctor) = db.get_doctor(doctor_id)? {
                    db.push_notification(
                        &doctor.account_address,
                        "Your registration was approved",
                        "approval",
                        Self::now(),
                    )?;
                }
            }
            Ok(())
        })?;
        info!(doctor_id, "Doctor approved");
        Ok(())
    }

    fn get_user_type(&self, address: &str) -> ContractResult<UserType> {
        self.with_db(|db| {
            let admin = db.admin_address()?;
            if !admin.is_empty() && admin.eq_ignore_ascii_case(address) {
                return Ok(UserType {
                    user_type: UserRole::Admin,
                    name: "Administrator".to_string(),
                });
            }
            if let Some(doctor) = db.get_doctor_by_address(address)? {
                return Ok(UserType {
                    user_type: UserRole::Doctor,
                    name: doctor.name,
                });
            }
            if let Some(patient) = db.get_patient_by_address(address)? {
                return Ok(UserType {
                    user_type: UserRole::Patient,
                    name: patient.name,
                });
            }
            Ok(UserType::unregistered())
        })
    }

    fn get_notifications(&self, address: &str) -> ContractResult<Vec<Notification>> {
        self.with_db(|db| db.list_notifications(address))
    }
}
