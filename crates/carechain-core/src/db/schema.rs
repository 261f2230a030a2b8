//! SQLite schema definition.

/// Complete schema for the local ledger and content store.
pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Registries
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_address TEXT NOT NULL UNIQUE COLLATE NOCASE,
    name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved')),
    appointment_count INTEGER NOT NULL DEFAULT 0,
    successful_treatment_count INTEGER NOT NULL DEFAULT 0,
    ipfs_hash TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_address TEXT NOT NULL UNIQUE COLLATE NOCASE,
    name TEXT NOT NULL,
    ipfs_hash TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Append-only; entries are opaque strings
CREATE TABLE IF NOT EXISTS medical_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    record TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_history_patient ON medical_history(patient_id);

CREATE TABLE IF NOT EXISTS medicines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price REAL NOT NULL DEFAULT 0 CHECK (price >= 0),
    quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
    ipfs_hash TEXT,
    is_active INTEGER NOT NULL DEFAULT 1
);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    doctor_id INTEGER NOT NULL REFERENCES doctors(id),
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    appointment_date TEXT NOT NULL,
    time_from TEXT NOT NULL DEFAULT '',
    time_to TEXT NOT NULL DEFAULT '',
    condition TEXT NOT NULL DEFAULT '',
    message TEXT NOT NULL DEFAULT '',
    urgency TEXT NOT NULL DEFAULT 'normal',
    status TEXT NOT NULL DEFAULT 'pending',
    is_open INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_doctor ON appointments(doctor_id);
CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);

-- A closed appointment never reopens
CREATE TRIGGER IF NOT EXISTS appointments_no_reopen BEFORE UPDATE OF is_open ON appointments
WHEN old.is_open = 0 AND new.is_open <> 0
BEGIN
    SELECT RAISE(ABORT, 'Completed appointments cannot be reopened');
END;

-- ============================================================================
-- Notifications
-- ============================================================================

CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_address TEXT NOT NULL COLLATE NOCASE,
    message TEXT NOT NULL,
    category_type TEXT NOT NULL,
    timestamp INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_notifications_account ON notifications(account_address);

-- ============================================================================
-- Content-addressed blobs (Append-Only)
-- ============================================================================

CREATE TABLE IF NOT EXISTS content_blobs (
    hash TEXT PRIMARY KEY,                       -- hex SHA-256 of bytes
    name TEXT,
    content_type TEXT NOT NULL,
    bytes BLOB NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Ledger settings
-- ============================================================================

CREATE TABLE IF NOT EXISTS ledger_settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

INSERT OR IGNORE INTO ledger_settings (key, value) VALUES ('admin_address', '');
INSERT OR IGNORE INTO ledger_settings (key, value) VALUES ('appointment_fee', '0');
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_reopen_trigger() {
        let conn = setup();
        conn.execute(
            "INSERT INTO doctors (account_address, name) VALUES ('0xd', 'Doc')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO patients (account_address, name) VALUES ('0xp', 'Pat')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO appointments (doctor_id, patient_id, appointment_date) VALUES (1, 1, '2026-10-17')",
            [],
        )
        .unwrap();

        let closed = conn.execute("UPDATE appointments SET is_open = 0 WHERE id = 1", []);
        assert!(closed.is_ok());

        let reopened = conn.execute("UPDATE appointments SET is_open = 1 WHERE id = 1", []);
        assert!(reopened.is_err());
    }

    #[test]
    fn test_doctor_status_constraint() {
        let conn = setup();
        let result = conn.execute(
            "INSERT INTO doctors (account_address, name, status) VALUES ('0xd', 'Doc', 'retired')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_addresses_unique_ignoring_case() {
        let conn = setup();
        conn.execute(
            "INSERT INTO patients (account_address, name) VALUES ('0xABC', 'A')",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO patients (account_address, name) VALUES ('0xabc', 'B')",
            [],
        );
        assert!(duplicate.is_err());
    }
}
