//! JSON and CSV exports offered as file downloads.
//!
//! Every JSON export has a top-level `generatedAt` timestamp followed by
//! domain objects mirroring the in-memory state. There is no version field.

mod analytics;
mod appointments;
mod profile;

pub use analytics::*;
pub use appointments::*;
pub use profile::*;

use chrono::{DateTime, Utc};

/// Suggested download filename, e.g. `analytics-report-2026-10-17.json`.
pub fn file_name(kind: &str, generated_at: &DateTime<Utc>, extension: &str) -> String {
    format!(
        "{}-report-{}.{}",
        kind,
        generated_at.format("%Y-%m-%d"),
        extension
    )
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
