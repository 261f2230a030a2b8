//! Query definition and evaluation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Queryable;

/// Error for unrecognised filter or sort names.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseQueryError {
    kind: &'static str,
    value: String,
}

/// A categorical filter: everything, or one lower-cased label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` or blank means no filter; anything else is a label.
    pub fn parse(s: &str) -> Self {
        let s = s.trim().to_lowercase();
        if s.is_empty() || s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s)
        }
    }

    fn admits(&self, label: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => label == Some(wanted.as_str()),
        }
    }
}

/// Calendar bucket relative to "today".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBucket {
    #[default]
    All,
    /// Same calendar day
    Today,
    /// Same ISO week
    Week,
    /// Same calendar month
    Month,
}

impl DateBucket {
    /// Whether `date` falls in this bucket. Undated items only match `All`.
    pub fn contains(self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match (self, date) {
            (DateBucket::All, _) => true,
            (_, None) => false,
            (DateBucket::Today, Some(d)) => d == today,
            (DateBucket::Week, Some(d)) => d.iso_week() == today.iso_week(),
            (DateBucket::Month, Some(d)) => d.year() == today.year() && d.month() == today.month(),
        }
    }
}

impl FromStr for DateBucket {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(DateBucket::All),
            "today" => Ok(DateBucket::Today),
            "week" => Ok(DateBucket::Week),
            "month" => Ok(DateBucket::Month),
            other => Err(ParseQueryError {
                kind: "date bucket",
                value: other.to_string(),
            }),
        }
    }
}

/// Sort orders offered by list screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest date first; undated items last
    Recent,
    /// Case-insensitive name, A to Z
    Name,
    /// Status label, A to Z
    Status,
    /// Emergency, then urgent, then normal, then anything else
    Urgency,
}

impl SortKey {
    fn compare<T: Queryable>(self, a: &T, b: &T) -> Ordering {
        match self {
            SortKey::Recent => b.calendar_date().cmp(&a.calendar_date()),
            SortKey::Name => a
                .sort_name()
                .to_lowercase()
                .cmp(&b.sort_name().to_lowercase()),
            SortKey::Status => a.status_label().cmp(&b.status_label()),
            SortKey::Urgency => urgency_rank(a).cmp(&urgency_rank(b)),
        }
    }
}

fn urgency_rank<T: Queryable>(item: &T) -> u8 {
    item.urgency().map(|u| u.rank()).unwrap_or(u8::MAX)
}

impl FromStr for SortKey {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" | "date" | "newest" => Ok(SortKey::Recent),
            "name" => Ok(SortKey::Name),
            "status" => Ok(SortKey::Status),
            "urgency" | "priority" => Ok(SortKey::Urgency),
            other => Err(ParseQueryError {
                kind: "sort key",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Recent => "recent",
            SortKey::Name => "name",
            SortKey::Status => "status",
            SortKey::Urgency => "urgency",
        };
        f.write_str(name)
    }
}

/// Search text, filters and sort order for one list screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub search: String,
    pub status: CategoryFilter,
    pub urgency: CategoryFilter,
    pub date: DateBucket,
    /// `None` keeps the input order
    pub sort: Option<SortKey>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = CategoryFilter::parse(status);
        self
    }

    pub fn urgency(mut self, urgency: &str) -> Self {
        self.urgency = CategoryFilter::parse(urgency);
        self
    }

    pub fn date(mut self, bucket: DateBucket) -> Self {
        self.date = bucket;
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// Whether a single item passes the search and filters.
    pub fn matches<T: Queryable>(&self, item: &T, today: NaiveDate) -> bool {
        self.matches_search(item)
            && self.status.admits(item.status_label().as_deref())
            && self
                .urgency
                .admits(item.urgency().map(|u| u.as_str()))
            && self.date.contains(item.calendar_date(), today)
    }

    fn matches_search<T: Queryable>(&self, item: &T) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        if item.id_key() == needle.trim_start_matches('#') {
            return true;
        }
        item.text_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filter then sort. The input is left untouched.
    pub fn apply<T: Queryable + Clone>(&self, items: &[T], today: NaiveDate) -> Vec<T> {
        let mut result: Vec<T> = items
            .iter()
            .filter(|item| self.matches(*item, today))
            .cloned()
            .collect();
        if let Some(key) = self.sort {
            result.sort_by(|a, b| key.compare(a, b));
        }
        result
    }
}
