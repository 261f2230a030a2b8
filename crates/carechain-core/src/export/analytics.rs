//! Platform analytics export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::PlatformAnalytics;

/// Analytics snapshot as downloaded from the admin screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analytics: PlatformAnalytics,
}

impl AnalyticsReport {
    pub fn new(analytics: PlatformAnalytics) -> Self {
        Self {
            generated_at: Utc::now(),
            analytics,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn file_name(&self) -> String {
        super::file_name("analytics", &self.generated_at, "json")
    }
}
