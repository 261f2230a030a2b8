//! Medicine inventory models.

use serde::{Deserialize, Serialize};

use super::lenient;

/// A medicine in the platform inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub description: String,
    /// Unit price in the contract's fee denomination
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub price: f64,
    /// Units in stock
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub quantity: u64,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub ipfs_hash: Option<String>,
    #[serde(default = "active_by_default", deserialize_with = "lenient::flag")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl Medicine {
    pub fn is_low_stock(&self, threshold: u64) -> bool {
        self.quantity < threshold
    }

    /// Value of the units in stock.
    pub fn stock_value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
