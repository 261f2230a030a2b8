//! Doctor and patient registry operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{to_i64, to_u64, Database, DbError, DbResult};
use crate::models::{Doctor, Patient};

const DOCTOR_COLUMNS: &str = "id, name, account_address, status, appointment_count, \
                              successful_treatment_count, ipfs_hash";

const PATIENT_COLUMNS: &str = "id, account_address, name, ipfs_hash";

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: to_u64(row.get(0)?),
        name: row.get(1)?,
        account_address: row.get(2)?,
        status: row.get(3)?,
        appointment_count: to_u64(row.get(4)?),
        successful_treatment_count: to_u64(row.get(5)?),
        ipfs_hash: row.get(6)?,
        profile: None,
    })
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: to_u64(row.get(0)?),
        account_address: row.get(1)?,
        name: row.get(2)?,
        ipfs_hash: row.get(3)?,
        profile: None,
    })
}

impl Database {
    /// Fail if the address already belongs to a doctor or a patient.
    fn ensure_address_free(&self, address: &str) -> DbResult<()> {
        let taken: bool = self.conn.query_row(
            r#"
            SELECT EXISTS(SELECT 1 FROM doctors WHERE account_address = ?1)
                OR EXISTS(SELECT 1 FROM patients WHERE account_address = ?1)
            "#,
            [address],
            |row| row.get(0),
        )?;
        if taken {
            return Err(DbError::Constraint(format!(
                "address {} is already registered",
                address
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Doctors
    // =========================================================================

    /// Register a doctor (pending approval). Returns the new id.
    pub fn register_doctor(&self, address: &str, name: &str, ipfs_hash: Option<&str>) -> DbResult<u64> {
        self.ensure_address_free(address)?;
        self.conn.execute(
            "INSERT INTO doctors (account_address, name, ipfs_hash) VALUES (?1, ?2, ?3)",
            params![address, name, ipfs_hash],
        )?;
        Ok(to_u64(self.conn.last_insert_rowid()))
    }

    pub fn get_doctor(&self, id: u64) -> DbResult<Option<Doctor>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM doctors WHERE id = ?", DOCTOR_COLUMNS),
                [to_i64(id)],
                doctor_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn get_doctor_by_address(&self, address: &str) -> DbResult<Option<Doctor>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM doctors WHERE account_address = ?", DOCTOR_COLUMNS),
                [address],
                doctor_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM doctors ORDER BY id", DOCTOR_COLUMNS))?;
        let rows = stmt.query_map([], doctor_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Mark a doctor approved. Returns false if already approved.
    pub fn approve_doctor(&self, id: u64) -> DbResult<bool> {
        if self.get_doctor(id)?.is_none() {
            return Err(DbError::NotFound(format!("doctor {}", id)));
        }
        let rows_affected = self.conn.execute(
            "UPDATE doctors SET status = 'approved' WHERE id = ? AND status <> 'approved'",
            [to_i64(id)],
        )?;
        Ok(rows_affected > 0)
    }

    // =========================================================================
    // Patients
    // =========================================================================

    /// Register a patient. Returns the new id.
    pub fn register_patient(&self, address: &str, name: &str, ipfs_hash: Option<&str>) -> DbResult<u64> {
        self.ensure_address_free(address)?;
        self.conn.execute(
            "INSERT INTO patients (account_address, name, ipfs_hash) VALUES (?1, ?2, ?3)",
            params![address, name, ipfs_hash],
        )?;
        Ok(to_u64(self.conn.last_insert_rowid()))
    }

    pub fn get_patient(&self, id: u64) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?", PATIENT_COLUMNS),
                [to_i64(id)],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn get_patient_by_address(&self, address: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE account_address = ?", PATIENT_COLUMNS),
                [address],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM patients ORDER BY id", PATIENT_COLUMNS))?;
        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Append an entry to a patient's medical history.
    pub fn append_medical_record(&self, patient_id: u64, record: &str) -> DbResult<()> {
        if self.get_patient(patient_id)?.is_none() {
            return Err(DbError::NotFound(format!("patient {}", patient_id)));
        }
        self.conn.execute(
            "INSERT INTO medical_history (patient_id, record) VALUES (?1, ?2)",
            params![to_i64(patient_id), record],
        )?;
        Ok(())
    }

    /// A patient's history, oldest entry first.
    pub fn medical_history(&self, patient_id: u64) -> DbResult<Vec<String>> {
        if self.get_patient(patient_id)?.is_none() {
            return Err(DbError::NotFound(format!("patient {}", patient_id)));
        }
        let mut stmt = self
            .conn
            .prepare("SELECT record FROM medical_history WHERE patient_id = ? ORDER BY id")?;
        let rows = stmt.query_map([to_i64(patient_id)], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_register_and_get_doctor() {
        let db = setup_db();
        let id = db.register_doctor("0xD0C", "Dr. Grey", Some("abc123")).unwrap();

        let doctor = db.get_doctor(id).unwrap().unwrap();
        assert_eq!(doctor.name, "Dr. Grey");
        assert_eq!(doctor.status, "pending");
        assert_eq!(doctor.ipfs_hash, Some("abc123".into()));

        // Address lookup ignores case
        let by_address = db.get_doctor_by_address("0xd0c").unwrap().unwrap();
        assert_eq!(by_address.id, id);
    }

    #[test]
    fn test_approve_doctor() {
        let db = setup_db();
        let id = db.register_doctor("0x1", "Dr. Grey", None).unwrap();

        assert!(db.approve_doctor(id).unwrap());
        assert!(!db.approve_doctor(id).unwrap());
        assert!(db.get_doctor(id).unwrap().unwrap().is_approved());

        assert!(matches!(db.approve_doctor(99), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_address_cannot_hold_two_roles() {
        let db = setup_db();
        db.register_doctor("0x1", "Dr. Grey", None).unwrap();
        let result = db.register_patient("0x1", "Grey", None);
        assert!(matches!(result, Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_medical_history_order() {
        let db = setup_db();
        let id = db.register_patient("0x7", "Alex", None).unwrap();

        assert!(db.medical_history(id).unwrap().is_empty());
        db.append_medical_record(id, "first").unwrap();
        db.append_medical_record(id, "second").unwrap();
        assert_eq!(db.medical_history(id).unwrap(), vec!["first", "second"]);

        assert!(matches!(
            db.append_medical_record(42, "orphan"),
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_patients() {
        let db = setup_db();
        db.register_patient("0x1", "A", None).unwrap();
        db.register_patient("0x2", "B", Some("hash")).unwrap();

        let patients = db.list_patients().unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[1].ipfs_hash, Some("hash".into()));
    }
}
