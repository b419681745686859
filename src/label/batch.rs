//! Bulk label generation.
//!
//! Composes a label for every item (optionally restricted to one category)
//! in catalog order. A failing item is recorded and the batch moves on.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use super::Compositor;
use crate::catalog::{InventoryItem, same_category};
use crate::error::ShelfError;

/// An item whose label could not be composed.
#[derive(Debug)]
pub struct BatchFailure {
    pub item_id: String,
    pub error: ShelfError,
}

/// Outcome of a bulk run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Items that matched the filter and were attempted
    pub attempted: usize,
    /// Labels written, in catalog order
    pub succeeded: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} labels generated",
            self.succeeded_count(),
            self.attempted
        )?;
        if !self.failures.is_empty() {
            write!(f, " ({} failed)", self.failures.len())?;
        }
        Ok(())
    }
}

/// Compose labels for `items`, keeping only `category` when given.
///
/// Every matching item is attempted exactly once, in order. Failures are
/// collected in the report and never stop the run.
pub fn compose_all<'a, I>(
    compositor: &mut Compositor,
    items: I,
    category: Option<&str>,
) -> BatchReport
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    let mut report = BatchReport::default();

    let selected = items
        .into_iter()
        .filter(|item| category.is_none_or(|c| same_category(&item.category, c)));

    for item in selected {
        report.attempted += 1;
        match compositor.compose(item) {
            Ok(path) => report.succeeded.push(path),
            Err(error) => {
                warn!(item_id = %item.item_id, error = %error, "label failed");
                report.failures.push(BatchFailure {
                    item_id: item.item_id.clone(),
                    error,
                });
            }
        }
    }

    info!(
        attempted = report.attempted,
        succeeded = report.succeeded_count(),
        category = category.unwrap_or("*"),
        "bulk label run finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputDirs;
    use crate::font::FontSource;

    fn item(id: &str, category: &str, barcode: &str) -> InventoryItem {
        InventoryItem {
            item_id: id.into(),
            name: format!("Item {}", id),
            category: category.into(),
            quantity: "1".into(),
            unit_price: "1.00".into(),
            barcode: barcode.into(),
            expiry_date: None,
        }
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut compositor =
            Compositor::with_fonts(OutputDirs::under(dir.path()), &[FontSource::Builtin]);
        let items = vec![
            item("A001", "Tools", "012345678905"),
            item("A002", "Tools", "BAD\u{2603}"),
            item("A003", "Tools", "ABC123"),
        ];

        let report = compose_all(&mut compositor, &items, None);

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded_count(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].item_id, "A002");
        assert!(matches!(report.failures[0].error, ShelfError::Encoding(_)));
        assert!(report.succeeded[1].to_string_lossy().contains("A003"));
        assert_eq!(report.to_string(), "2 of 3 labels generated (1 failed)");
    }

    #[test]
    fn test_category_filter_is_case_insensitive_exact() {
        let dir = tempfile::tempdir().unwrap();
        let mut compositor =
            Compositor::with_fonts(OutputDirs::under(dir.path()), &[FontSource::Builtin]);
        let items = vec![
            item("A001", "Tools", "111"),
            item("B001", "Dairy", "222"),
            item("A002", "tools", "333"),
            item("A003", "Toolset", "444"),
        ];

        let report = compose_all(&mut compositor, &items, Some("TOOLS"));
        assert_eq!(report.attempted, 2);
        assert!(report.is_complete());
    }

    #[test]
    fn test_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut compositor =
            Compositor::with_fonts(OutputDirs::under(dir.path()), &[FontSource::Builtin]);
        let items = vec![item("A001", "Tools", "111")];

        let report = compose_all(&mut compositor, &items, Some("Frozen"));
        assert_eq!(report.attempted, 0);
        assert_eq!(report.to_string(), "0 of 0 labels generated");
    }
}
