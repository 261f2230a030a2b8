//! Ledger-wide settings (admin address, appointment fee).

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};

const ADMIN_ADDRESS: &str = "admin_address";
const APPOINTMENT_FEE: &str = "appointment_fee";

impl Database {
    fn get_setting(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM ledger_settings WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn set_setting(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO ledger_settings (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Admin address, or empty if none has been set.
    pub fn admin_address(&self) -> DbResult<String> {
        Ok(self.get_setting(ADMIN_ADDRESS)?.unwrap_or_default())
    }

    pub fn set_admin_address(&self, address: &str) -> DbResult<()> {
        self.set_setting(ADMIN_ADDRESS, address)
    }

    pub fn appointment_fee(&self) -> DbResult<u64> {
        Ok(self
            .get_setting(APPOINTMENT_FEE)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0))
    }

    pub fn set_appointment_fee(&self, fee: u64) -> DbResult<()> {
        self.set_setting(APPOINTMENT_FEE, &fee.to_string())
    }

    /// Row counts for the ledger summary: doctors, patients, medicines, appointments.
    pub fn entity_counts(&self) -> DbResult<(u64, u64, u64, u64)> {
        self.conn
            .query_row(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM doctors),
                    (SELECT COUNT(*) FROM patients),
                    (SELECT COUNT(*) FROM medicines),
                    (SELECT COUNT(*) FROM appointments)
                "#,
                [],
                |row| {
                    Ok((
                        super::to_u64(row.get(0)?),
                        super::to_u64(row.get(1)?),
                        super::to_u64(row.get(2)?),
                        super::to_u64(row.get(3)?),
                    ))
                },
            )
            .map_err(Into::into)
    }
}
