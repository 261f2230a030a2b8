//! Appointment booking and lifecycle operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{to_i64, to_u64, Database, DbError, DbResult};
use crate::models::Appointment;

const APPOINTMENT_COLUMNS: &str = "id, doctor_id, patient_id, appointment_date, time_from, time_to, \
                                   condition, message, urgency, status, is_open";

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: to_u64(row.get(0)?),
        doctor_id: to_u64(row.get(1)?),
        patient_id: to_u64(row.get(2)?),
        appointment_date: row.get(3)?,
        from: row.get(4)?,
        to: row.get(5)?,
        condition: row.get(6)?,
        message: row.get(7)?,
        urgency: row.get(8)?,
        status: row.get(9)?,
        is_open: row.get(10)?,
    })
}

/// Fields needed to book an appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub doctor_id: u64,
    pub patient_id: u64,
    pub appointment_date: String,
    pub from: String,
    pub to: String,
    pub condition: String,
    pub message: String,
    pub urgency: String,
}

impl Database {
    /// Book an appointment and bump the doctor's appointment count.
    ///
    /// The doctor must exist and be approved; the patient must exist.
    pub fn book_appointment(&self, new: &NewAppointment) -> DbResult<u64> {
        let doctor = self
            .get_doctor(new.doctor_id)?
            .ok_or_else(|| DbError::NotFound(format!("doctor {}", new.doctor_id)))?;
        if !doctor.is_approved() {
            return Err(DbError::Constraint(format!(
                "doctor {} is not approved",
                new.doctor_id
            )));
        }
        if self.get_patient(new.patient_id)?.is_none() {
            return Err(DbError::NotFound(format!("patient {}", new.patient_id)));
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            r#"
            INSERT INTO appointments (
                doctor_id, patient_id, appointment_date, time_from, time_to,
                condition, message, urgency, status, is_open
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'pending', 1)
            "#,
            params![
                to_i64(new.doctor_id),
                to_i64(new.patient_id),
                new.appointment_date,
                new.from,
                new.to,
                new.condition,
                new.message,
                new.urgency.trim().to_lowercase(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "UPDATE doctors SET appointment_count = appointment_count + 1 WHERE id = ?",
            [to_i64(new.doctor_id)],
        )?;
        tx.commit()?;

        Ok(to_u64(id))
    }

    pub fn get_appointment(&self, id: u64) -> DbResult<Option<Appointment>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM appointments WHERE id = ?", APPOINTMENT_COLUMNS),
                [to_i64(id)],
                appointment_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM appointments ORDER BY id",
            APPOINTMENT_COLUMNS
        ))?;
        let rows = stmt.query_map([], appointment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn list_doctor_appointments(&self, doctor_id: u64) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM appointments WHERE doctor_id = ? ORDER BY id",
            APPOINTMENT_COLUMNS
        ))?;
        let rows = stmt.query_map([to_i64(doctor_id)], appointment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Close an open appointment and credit the doctor with a successful
    /// treatment. Completing an already-closed appointment is an error.
    pub fn complete_appointment(&self, id: u64) -> DbResult<Appointment> {
        let appointment = self
            .get_appointment(id)?
            .ok_or_else(|| DbError::NotFound(format!("appointment {}", id)))?;
        if !appointment.is_open {
            return Err(DbError::Constraint(format!(
                "appointment {} is already completed",
                id
            )));
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE appointments SET is_open = 0, status = 'completed' WHERE id = ? AND is_open = 1",
            [to_i64(id)],
        )?;
        tx.execute(
            "UPDATE doctors SET successful_treatment_count = successful_treatment_count + 1 WHERE id = ?",
            [to_i64(appointment.doctor_id)],
        )?;
        tx.commit()?;

        self.get_appointment(id)?
            .ok_or_else(|| DbError::NotFound(format!("appointment {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> (Database, u64, u64) {
        let db = Database::open_in_memory().unwrap();
        let doctor = db.register_doctor("0xd", "Dr. Grey", None).unwrap();
        db.approve_doctor(doctor).unwrap();
        let patient = db.register_patient("0xp", "Alex", None).unwrap();
        (db, doctor, patient)
    }

    fn request(doctor_id: u64, patient_id: u64) -> NewAppointment {
        NewAppointment {
            doctor_id,
            patient_id,
            appointment_date: "2026-10-17".into(),
            from: "09:00".into(),
            to: "09:30".into(),
            condition: "Migraine".into(),
            message: "Recurring for two weeks".into(),
            urgency: "Urgent".into(),
        }
    }

    #[test]
    fn test_book_appointment() {
        let (db, doctor, patient) = setup_db();
        let id = db.book_appointment(&request(doctor, patient)).unwrap();

        let appointment = db.get_appointment(id).unwrap().unwrap();
        assert!(appointment.is_open);
        assert_eq!(appointment.urgency, "urgent");
        assert_eq!(appointment.time_range(), "09:00 - 09:30");
        assert_eq!(db.get_doctor(doctor).unwrap().unwrap().appointment_count, 1);
    }

    #[test]
    fn test_booking_requires_approved_doctor() {
        let db = Database::open_in_memory().unwrap();
        let doctor = db.register_doctor("0xd", "Dr. New", None).unwrap();
        let patient = db.register_patient("0xp", "Alex", None).unwrap();

        let result = db.book_appointment(&request(doctor, patient));
        assert!(matches!(result, Err(DbError::Constraint(_))));

        let result = db.book_appointment(&request(doctor, 77));
        assert!(result.is_err());
    }

    #[test]
    fn test_complete_exactly_once() {
        let (db, doctor, patient) = setup_db();
        let id = db.book_appointment(&request(doctor, patient)).unwrap();

        let completed = db.complete_appointment(id).unwrap();
        assert!(!completed.is_open);
        assert_eq!(completed.status, "completed");

        let again = db.complete_appointment(id);
        assert!(matches!(again, Err(DbError::Constraint(_))));

        let doctor = db.get_doctor(doctor).unwrap().unwrap();
        assert_eq!(doctor.successful_treatment_count, 1);
        assert_eq!(doctor.success_rate(), 100);
    }

    #[test]
    fn test_list_doctor_appointments() {
        let (db, doctor, patient) = setup_db();
        let other = db.register_doctor("0xe", "Dr. Other", None).unwrap();
        db.approve_doctor(other).unwrap();

        db.book_appointment(&request(doctor, patient)).unwrap();
        db.book_appointment(&request(other, patient)).unwrap();
        db.book_appointment(&request(doctor, patient)).unwrap();

        assert_eq!(db.list_appointments().unwrap().len(), 3);
        assert_eq!(db.list_doctor_appointments(doctor).unwrap().len(), 2);
        assert!(matches!(db.complete_appointment(99), Err(DbError::NotFound(_))));
    }
}
