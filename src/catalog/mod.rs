//! # Catalog Store
//!
//! Read-only snapshot of the inventory catalog, loaded once from a CSV file
//! and passed explicitly to every pipeline call.
//!
//! ## Example
//!
//! ```
//! use shelfcode::catalog::Catalog;
//!
//! let csv = "item_id,name,category,quantity,unit_price,barcode,expiry_date\n\
//!            A001,Widget,Tools,10,4.99,012345678905,\n";
//! let catalog = Catalog::from_csv(csv).unwrap();
//!
//! assert_eq!(catalog.find_by_id("a001").unwrap().name, "Widget");
//! ```

mod item;
pub mod reader;

pub use item::{EXPIRY_FORMAT, ExpiryStatus, InventoryItem};

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ShelfError;

/// Columns every catalog must carry.
pub const REQUIRED_COLUMNS: &[&str] = &["item_id", "name", "barcode"];

/// Ordered, immutable collection of inventory items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<InventoryItem>,
}

impl Catalog {
    /// Load the catalog from a CSV file.
    ///
    /// Any failure here is a [`ShelfError::CatalogLoad`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShelfError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ShelfError::CatalogLoad(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let catalog = Self::from_csv(&text)?;
        info!(path = %path.display(), items = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse CSV text: a header row naming the columns, then one row per item.
    pub fn from_csv(text: &str) -> Result<Self, ShelfError> {
        let mut records = reader::parse(text)?.into_iter();
        let header = records
            .next()
            .ok_or_else(|| ShelfError::CatalogLoad("catalog is empty".to_string()))?;
        let columns: Vec<String> = header
            .fields
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect();

        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c == required) {
                return Err(ShelfError::CatalogLoad(format!(
                    "missing required column '{}'",
                    required
                )));
            }
        }

        let mut items = Vec::new();
        for record in records {
            if record.fields.len() != columns.len() {
                return Err(ShelfError::CatalogLoad(format!(
                    "line {}: expected {} fields, found {}",
                    record.line,
                    columns.len(),
                    record.fields.len()
                )));
            }

            let row: Map<String, Value> = columns
                .iter()
                .cloned()
                .zip(record.fields.into_iter().map(Value::String))
                .collect();
            let item: InventoryItem = serde_json::from_value(Value::Object(row))
                .map_err(|e| ShelfError::CatalogLoad(format!("line {}: {}", record.line, e)))?;
            debug!(item_id = %item.item_id, line = record.line, "parsed item");
            items.push(item);
        }

        Ok(Self { items })
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact id lookup; the query is trimmed and compared in uppercase.
    pub fn find_by_id(&self, item_id: &str) -> Option<&InventoryItem> {
        let wanted = item_id.trim().to_uppercase();
        self.items
            .iter()
            .find(|item| item.item_id.to_uppercase() == wanted)
    }

    /// Like [`find_by_id`](Self::find_by_id) but reports a miss as [`ShelfError::NotFound`].
    pub fn get(&self, item_id: &str) -> Result<&InventoryItem, ShelfError> {
        self.find_by_id(item_id).ok_or_else(|| {
            ShelfError::NotFound(format!("no item found with ID: {}", item_id.trim().to_uppercase()))
        })
    }

    /// Case-insensitive substring match on the item name.
    pub fn search_by_name(&self, query: &str) -> Vec<&InventoryItem> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Items whose category equals `category`, ignoring case.
    pub fn in_category(&self, category: &str) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|item| same_category(&item.category, category))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.iter().any(|c| same_category(c, &item.category)) {
                seen.push(&item.category);
            }
        }
        seen
    }
}

/// Exact, case-insensitive category comparison.
pub fn same_category(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CSV: &str = "\
item_id,name,category,quantity,unit_price,barcode,expiry_date
A001,Widget,Tools,10,4.99,012345678905,
A002,Gadget Pro,tools,5,19.50,ABC123,2030-01-01
B001,Milk,Dairy,40,1.25,4006381333931,2024-05-01
";

    #[test]
    fn test_from_csv() {
        let catalog = Catalog::from_csv(CSV).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.items()[1].name, "Gadget Pro");
        assert_eq!(catalog.items()[0].expiry_date, None);
        assert_eq!(catalog.items()[2].expiry_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_find_by_id_normalizes_case() {
        let catalog = Catalog::from_csv(CSV).unwrap();
        assert_eq!(catalog.find_by_id(" b001 ").unwrap().name, "Milk");
        assert!(catalog.find_by_id("Z999").is_none());
        assert!(matches!(catalog.get("z999"), Err(ShelfError::NotFound(_))));
    }

    #[test]
    fn test_search_by_name_is_partial() {
        let catalog = Catalog::from_csv(CSV).unwrap();
        let hits: Vec<_> = catalog
            .search_by_name("GET")
            .iter()
            .map(|i| i.item_id.as_str())
            .collect();
        assert_eq!(hits, vec!["A001", "A002"]);
    }

    #[test]
    fn test_categories_and_filter() {
        let catalog = Catalog::from_csv(CSV).unwrap();
        assert_eq!(catalog.categories(), vec!["Tools", "Dairy"]);
        assert_eq!(catalog.in_category("TOOLS").len(), 2);
        assert_eq!(catalog.in_category("Tool").len(), 0);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "item_id,name,barcode,location\nA1,Thing,123,Aisle 4\n";
        let catalog = Catalog::from_csv(csv).unwrap();
        assert_eq!(catalog.items()[0].barcode, "123");
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(Catalog::from_csv(""), Err(ShelfError::CatalogLoad(_))));
        assert!(matches!(
            Catalog::from_csv("item_id,name\nA1,Thing\n"),
            Err(ShelfError::CatalogLoad(_))
        ));

        let err = Catalog::from_csv("item_id,name,barcode\nA1,Thing\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/items.csv").unwrap_err();
        assert!(err.is_fatal());
    }
}
