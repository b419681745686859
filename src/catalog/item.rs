//! Inventory item record.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Date format used by the `expiry_date` column.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// One row of the catalog.
///
/// Quantity and price are kept exactly as they appear in the catalog so
/// that labels and listings reproduce the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit_price: String,
    pub barcode: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub expiry_date: Option<String>,
}

/// How an item's expiry date relates to a reference day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryStatus {
    /// No expiry date recorded
    None,
    /// Past the expiry date by this many days
    Expired(i64),
    /// Expires today or in this many days
    ExpiresIn(i64),
    /// The column holds something that isn't a `YYYY-MM-DD` date
    Unparsed(String),
}

impl InventoryItem {
    /// Expiry status relative to `today`.
    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        let Some(raw) = self.expiry_date.as_deref() else {
            return ExpiryStatus::None;
        };
        match NaiveDate::parse_from_str(raw.trim(), EXPIRY_FORMAT) {
            Ok(date) => {
                let days = (date - today).num_days();
                if days < 0 {
                    ExpiryStatus::Expired(-days)
                } else {
                    ExpiryStatus::ExpiresIn(days)
                }
            }
            Err(_) => ExpiryStatus::Unparsed(raw.to_string()),
        }
    }

    /// Price formatted for display, with a currency sign unless one is present.
    pub fn display_price(&self) -> String {
        let price = self.unit_price.trim();
        if price.starts_with('$') {
            price.to_string()
        } else {
            format!("${}", price)
        }
    }

    /// Ordered `(FIELD, value)` pairs for the detail view.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ITEM_ID", self.item_id.clone()),
            ("NAME", self.name.clone()),
            ("CATEGORY", self.category.clone()),
            ("QUANTITY", self.quantity.clone()),
            ("UNIT_PRICE", self.unit_price.clone()),
            ("BARCODE", self.barcode.clone()),
            (
                "EXPIRY_DATE",
                self.expiry_date.clone().unwrap_or_else(|| "N/A".to_string()),
            ),
        ]
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryStatus::None => write!(f, "no expiry"),
            ExpiryStatus::Expired(1) => write!(f, "EXPIRED 1 day ago"),
            ExpiryStatus::Expired(days) => write!(f, "EXPIRED {} days ago", days),
            ExpiryStatus::ExpiresIn(0) => write!(f, "expires today"),
            ExpiryStatus::ExpiresIn(1) => write!(f, "expires in 1 day"),
            ExpiryStatus::ExpiresIn(days) => write!(f, "expires in {} days", days),
            ExpiryStatus::Unparsed(raw) => write!(f, "unrecognized date '{}'", raw),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
