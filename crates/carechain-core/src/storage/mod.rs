//! Content-addressed storage boundary (IPFS).
//!
//! Entities carry a pointer (bare hash, `ipfs://` URI, or gateway URL) to an
//! off-chain JSON document. [`ContentStore`] is the client surface;
//! [`LocalContentStore`] keeps blobs in SQLite, addressed by SHA-256.

mod local;

pub use local::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Storage-client errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Content not found: {0}")]
    NotFound(String),

    #[error("Content is not a JSON document: {0}")]
    NotJson(String),

    #[error("Invalid content pointer: {0:?}")]
    InvalidPointer(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// What to upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadPayload {
    /// A JSON document, stored in its compact serialization
    Json(Value),
    /// A named file, stored byte for byte
    File { name: String, bytes: Vec<u8> },
}

impl UploadPayload {
    pub fn bytes(&self) -> StoreResult<Vec<u8>> {
        match self {
            UploadPayload::Json(value) => Ok(serde_json::to_vec(value)?),
            UploadPayload::File { bytes, .. } => Ok(bytes.clone()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            UploadPayload::Json(_) => None,
            UploadPayload::File { name, .. } => Some(name),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            UploadPayload::Json(_) => "application/json",
            UploadPayload::File { name, .. } => content_type_for(name),
        }
    }
}

fn content_type_for(name: &str) -> &'static str {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());
    match extension.as_deref() {
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Client surface of the content-addressed store.
pub trait ContentStore: Send + Sync {
    /// Store the payload and return its content hash.
    fn upload(&self, payload: &UploadPayload) -> StoreResult<String>;

    /// Fetch and parse the JSON document a pointer refers to.
    fn fetch_json(&self, pointer: &str) -> StoreResult<Value>;

    /// Public gateway URL for a pointer.
    fn url(&self, pointer: &str) -> StoreResult<String>;
}

/// Lower-case hex SHA-256 of the bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Reduce a pointer to its bare hash.
///
/// Accepts `<hash>`, `ipfs://<hash>`, and gateway URLs of the form
/// `https://host/ipfs/<hash>`; trailing slashes and query strings are dropped.
pub fn normalize_pointer(pointer: &str) -> StoreResult<&str> {
    let mut hash = pointer.trim();
    if let Some(rest) = hash.strip_prefix("ipfs://") {
        hash = rest;
    }
    if let Some(index) = hash.rfind("/ipfs/") {
        hash = &hash[index + "/ipfs/".len()..];
    }
    if let Some(index) = hash.find(['?', '#']) {
        hash = &hash[..index];
    }
    let hash = hash.trim_end_matches('/');

    if hash.is_empty() || hash.contains('/') || hash.contains(char::is_whitespace) {
        return Err(StoreError::InvalidPointer(pointer.to_string()));
    }
    Ok(hash)
}

/// Fetch a pointer and decode it into a typed document.
pub fn fetch_document<T: DeserializeOwned>(store: &dyn ContentStore, pointer: &str) -> StoreResult<T> {
    let value = store.fetch_json(pointer)?;
    Ok(serde_json::from_value(value)?)
}

/// Serialize a typed document and upload it.
pub fn upload_document<T: Serialize>(store: &dyn ContentStore, document: &T) -> StoreResult<String> {
    let value = serde_json::to_value(document)?;
    store.upload(&UploadPayload::Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_known_value() {
        assert_eq!(
            content_hash(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_normalize_pointer_forms() {
        assert_eq!(normalize_pointer("abc123").unwrap(), "abc123");
        assert_eq!(normalize_pointer(" ipfs://abc123 ").unwrap(), "abc123");
        assert_eq!(
            normalize_pointer("https://gateway.pinata.cloud/ipfs/abc123/").unwrap(),
            "abc123"
        );
        assert_eq!(
            normalize_pointer("https://ipfs.io/ipfs/abc123?filename=p.json").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_pointer("").is_err());
        assert!(normalize_pointer("ipfs://").is_err());
        assert!(normalize_pointer("https://example.org/files/abc").is_err());
        assert!(normalize_pointer("two words").is_err());
    }

    #[test]
    fn test_payload_content_types() {
        let file = UploadPayload::File {
            name: "scan.PDF".into(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(file.content_type(), "application/pdf");
        assert_eq!(file.name(), Some("scan.PDF"));
        assert_eq!(file.bytes().unwrap(), vec![1, 2, 3]);

        let json = UploadPayload::Json(serde_json::json!({"a": 1}));
        assert_eq!(json.content_type(), "application/json");
        assert_eq!(json.bytes().unwrap(), br#"{"a":1}"#.to_vec());
    }
}
