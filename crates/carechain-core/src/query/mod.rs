//! In-memory search, filtering and sorting for dashboard lists.
//!
//! Queries run over already-fetched data and are cheap enough to re-run on
//! every change. Sorting is stable and uses only the chosen comparator.

mod filter;
mod row;

pub use filter::*;
pub use row::*;

use std::borrow::Cow;

use chrono::NaiveDate;

use crate::models::{Appointment, Doctor, Medicine, Patient, Urgency};

/// A list item the query engine can search, filter and sort.
pub trait Queryable {
    /// Identifier matched exactly by search (a leading `#` is ignored).
    fn id_key(&self) -> String;

    /// Text fields matched case-insensitively by substring.
    fn text_fields(&self) -> Vec<Cow<'_, str>>;

    /// Name used by the name sort.
    fn sort_name(&self) -> Cow<'_, str>;

    /// Lower-cased status label, if the item has one.
    fn status_label(&self) -> Option<String> {
        None
    }

    /// Urgency, if the item has one.
    fn urgency(&self) -> Option<Urgency> {
        None
    }

    /// Date used by date buckets and the recency sort.
    fn calendar_date(&self) -> Option<NaiveDate> {
        None
    }
}

impl Queryable for Appointment {
    fn id_key(&self) -> String {
        self.id.to_string()
    }

    fn text_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.condition.as_str()),
            Cow::Borrowed(self.message.as_str()),
        ]
    }

    fn sort_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.condition.as_str())
    }

    fn status_label(&self) -> Option<String> {
        Some(Appointment::status_label(self))
    }

    fn urgency(&self) -> Option<Urgency> {
        Some(Appointment::urgency(self))
    }

    fn calendar_date(&self) -> Option<NaiveDate> {
        Appointment::calendar_date(self)
    }
}

impl Queryable for Doctor {
    fn id_key(&self) -> String {
        self.id.to_string()
    }

    fn text_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.account_address.as_str()),
        ];
        if let Some(specialization) = self.specialization() {
            fields.push(Cow::Borrowed(specialization));
        }
        fields
    }

    fn sort_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }

    fn status_label(&self) -> Option<String> {
        let status = self.status.trim().to_lowercase();
        Some(if status.is_empty() { "pending".to_string() } else { status })
    }
}

impl Queryable for Patient {
    fn id_key(&self) -> String {
        self.id.to_string()
    }

    fn text_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.account_address.as_str())];
        if let Some(name) = self.known_name() {
            fields.push(Cow::Borrowed(name));
        }
        fields
    }

    fn sort_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.display_name())
    }
}

impl Queryable for Medicine {
    fn id_key(&self) -> String {
        self.id.to_string()
    }

    fn text_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.description.as_str()),
        ]
    }

    fn sort_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }

    fn status_label(&self) -> Option<String> {
        Some(if self.is_active { "active" } else { "inactive" }.to_string())
    }
}
