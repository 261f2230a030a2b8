//! Medicine inventory operations.

use rusqlite::{params, Row};

use super::{to_i64, to_u64, Database, DbError, DbResult};
use crate::models::Medicine;

fn medicine_from_row(row: &Row<'_>) -> rusqlite::Result<Medicine> {
    Ok(Medicine {
        id: to_u64(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        quantity: to_u64(row.get(4)?),
        ipfs_hash: row.get(5)?,
        is_active: row.get(6)?,
    })
}

/// Fields needed to add a medicine.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u64,
    pub ipfs_hash: Option<String>,
}

impl Database {
    pub fn add_medicine(&self, new: &NewMedicine) -> DbResult<u64> {
        if new.name.trim().is_empty() {
            return Err(DbError::Constraint("medicine name is required".into()));
        }
        self.conn.execute(
            r#"
            INSERT INTO medicines (name, description, price, quantity, ipfs_hash)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                new.name.trim(),
                new.description,
                new.price,
                to_i64(new.quantity),
                new.ipfs_hash,
            ],
        )?;
        Ok(to_u64(self.conn.last_insert_rowid()))
    }

    pub fn list_medicines(&self) -> DbResult<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, price, quantity, ipfs_hash, is_active FROM medicines ORDER BY id",
        )?;
        let rows = stmt.query_map([], medicine_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Set stock level. Returns false if the medicine does not exist.
    pub fn set_medicine_quantity(&self, id: u64, quantity: u64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE medicines SET quantity = ?2 WHERE id = ?1",
            params![to_i64(id), to_i64(quantity)],
        )?;
        Ok(rows_affected > 0)
    }
}
