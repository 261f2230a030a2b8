//! Content-addressed blob table.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};

/// A stored blob and its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBlob {
    pub hash: String,
    pub name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Database {
    /// Store a blob under its hash. Returns false if it was already present.
    pub fn put_blob(&self, blob: &StoredBlob) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            INSERT OR IGNORE INTO content_blobs (hash, name, content_type, bytes)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![blob.hash, blob.name, blob.content_type, blob.bytes],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn get_blob(&self, hash: &str) -> DbResult<Option<StoredBlob>> {
        self.conn
            .query_row(
                "SELECT hash, name, content_type, bytes FROM content_blobs WHERE hash = ?",
                [hash],
                |row| {
                    Ok(StoredBlob {
                        hash: row.get(0)?,
                        name: row.get(1)?,
                        content_type: row.get(2)?,
                        bytes: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn blob_count(&self) -> DbResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM content_blobs", [], |row| row.get(0))?;
        Ok(super::to_u64(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let blob = StoredBlob {
            hash: "abc".into(),
            name: Some("profile.json".into()),
            content_type: "application/json".into(),
            bytes: b"{}".to_vec(),
        };

        assert!(db.put_blob(&blob).unwrap());
        assert!(!db.put_blob(&blob).unwrap());
        assert_eq!(db.blob_count().unwrap(), 1);
        assert_eq!(db.get_blob("abc").unwrap(), Some(blob));
        assert!(db.get_blob("missing").unwrap().is_none());
    }
}
