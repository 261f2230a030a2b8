//! Per-account notification log.

use rusqlite::params;

use super::{to_i64, to_u64, Database, DbResult};
use crate::models::Notification;

impl Database {
    /// Append a notification for an account.
    pub fn push_notification(
        &self,
        address: &str,
        message: &str,
        category_type: &str,
        timestamp: u64,
    ) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO notifications (account_address, message, category_type, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![address, message, category_type, to_i64(timestamp)],
        )?;
        Ok(())
    }

    /// Notifications for an account in insertion order.
    pub fn list_notifications(&self, address: &str) -> DbResult<Vec<Notification>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT message, category_type, timestamp
            FROM notifications
            WHERE account_address = ?
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map([address], |row| {
            Ok(Notification {
                message: row.get(0)?,
                category_type: row.get(1)?,
                timestamp: to_u64(row.get(2)?),
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_scoped_to_account() {
        let db = Database::open_in_memory().unwrap();
        db.push_notification("0xA", "Welcome", "account", 10).unwrap();
        db.push_notification("0xb", "Booked", "appointment", 20).unwrap();
        db.push_notification("0xa", "Approved", "approval", 30).unwrap();

        let for_a = db.list_notifications("0xa").unwrap();
        assert_eq!(for_a.len(), 2);
        assert_eq!(for_a[0].message, "Welcome");
        assert_eq!(for_a[1].timestamp, 30);

        assert!(db.list_notifications("0xc").unwrap().is_empty());
    }
}
