//! # Console Operations
//!
//! The user-facing operations behind both the interactive menu and the
//! direct CLI subcommands. Each operation writes its report to a `Write`
//! and returns an error only for the caller to turn into a message; none
//! of them exit the process.

pub mod menu;

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::catalog::{Catalog, ExpiryStatus, InventoryItem};
use crate::error::ShelfError;
use crate::label::{self, Compositor};
use crate::platform::Platform;
use crate::preview::{bars, raster};
use crate::symbol;

const RULE_WIDTH: usize = 60;
const TABLE_WIDTH: usize = 80;

fn rule(out: &mut impl Write, ch: char, width: usize) -> Result<(), ShelfError> {
    writeln!(out, "{}", ch.to_string().repeat(width))?;
    Ok(())
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Downsampled preview of the image at `path`, or just its location when
/// it can't be previewed.
fn write_raster_preview(path: &Path, out: &mut impl Write) -> Result<(), ShelfError> {
    match raster::downsample_file(path) {
        Ok(grid) => {
            for row in grid.rows() {
                writeln!(out, "{}", row)?;
            }
            writeln!(out, "Saved to {}", path.display())?;
        }
        Err(e) => {
            tracing::warn!(error = %e, "preview unavailable");
            writeln!(out, "Preview unavailable ({}).", e)?;
            writeln!(out, "Image saved to {}", path.display())?;
        }
    }
    Ok(())
}

/// Everything an operation needs: the catalog snapshot, the label
/// compositor (and its barcode cache), and the host platform.
pub struct Session<'a> {
    catalog: &'a Catalog,
    compositor: Compositor,
    platform: Box<dyn Platform>,
    today: NaiveDate,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog, compositor: Compositor, platform: Box<dyn Platform>) -> Self {
        Self {
            catalog,
            compositor,
            platform,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Fix the reference day used for expiry status.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Table of every item.
    pub fn list_items(&self, out: &mut impl Write) -> Result<(), ShelfError> {
        writeln!(out)?;
        rule(out, '=', TABLE_WIDTH)?;
        writeln!(
            out,
            "{:<10} {:<30} {:<15} {:<10} {:<10}",
            "ITEM ID", "NAME", "CATEGORY", "QUANTITY", "UNIT PRICE"
        )?;
        rule(out, '=', TABLE_WIDTH)?;
        for item in self.catalog.items() {
            writeln!(
                out,
                "{:<10} {:<30} {:<15} {:<10} {:<10}",
                item.item_id,
                clip(&item.name, 28),
                clip(&item.category, 13),
                item.quantity,
                item.display_price()
            )?;
        }
        rule(out, '=', TABLE_WIDTH)?;
        writeln!(out, "{} items", self.catalog.len())?;
        Ok(())
    }

    /// Catalog as pretty JSON.
    pub fn list_json(&self, out: &mut impl Write) -> Result<(), ShelfError> {
        let json = serde_json::to_string_pretty(self.catalog.items())
            .map_err(|e| ShelfError::Render(format!("JSON output failed: {}", e)))?;
        writeln!(out, "{}", json)?;
        Ok(())
    }

    /// Every field of one item.
    pub fn item_details(&self, item_id: &str, out: &mut impl Write) -> Result<(), ShelfError> {
        let item = self.catalog.get(item_id)?;
        self.write_details(item, out)
    }

    fn write_details(&self, item: &InventoryItem, out: &mut impl Write) -> Result<(), ShelfError> {
        writeln!(out)?;
        rule(out, '=', RULE_WIDTH)?;
        writeln!(out, "ITEM DETAILS: {}", item.name)?;
        rule(out, '=', RULE_WIDTH)?;
        for (field, value) in item.fields() {
            writeln!(out, "{}: {}", field, value)?;
        }
        let status = item.expiry_status(self.today);
        if status != ExpiryStatus::None {
            writeln!(out, "STATUS: {}", status)?;
        }
        rule(out, '=', RULE_WIDTH)?;
        Ok(())
    }

    /// Items whose name contains `query`.
    pub fn search_by_name(&self, query: &str, out: &mut impl Write) -> Result<(), ShelfError> {
        let query = query.trim();
        let found = self.catalog.search_by_name(query);
        if found.is_empty() {
            return Err(ShelfError::NotFound(format!("no items found matching '{}'", query)));
        }

        writeln!(out)?;
        rule(out, '=', TABLE_WIDTH)?;
        writeln!(out, "Found {} items matching '{}':", found.len(), query)?;
        rule(out, '=', TABLE_WIDTH)?;
        writeln!(out, "{:<10} {:<30} {:<15} {:<10}", "ITEM ID", "NAME", "CATEGORY", "QUANTITY")?;
        rule(out, '=', TABLE_WIDTH)?;
        for item in found {
            writeln!(
                out,
                "{:<10} {:<30} {:<15} {:<10}",
                item.item_id,
                clip(&item.name, 28),
                clip(&item.category, 13),
                item.quantity
            )?;
        }
        rule(out, '=', TABLE_WIDTH)?;
        Ok(())
    }

    /// Synthetic terminal barcode plus the generated scannable image.
    ///
    /// The preview is written even when the image can't be encoded; the
    /// encoding error is returned afterwards.
    pub fn show_barcode(&mut self, item_id: &str, out: &mut impl Write) -> Result<(), ShelfError> {
        let catalog = self.catalog;
        let item = catalog.get(item_id)?;
        let spec = symbol::select(&item.barcode);

        writeln!(out)?;
        rule(out, '=', RULE_WIDTH)?;
        writeln!(out, "ITEM: {} ({})", item.name, item.item_id)?;
        writeln!(out, "CATEGORY: {}", item.category)?;
        writeln!(out, "QUANTITY: {}", item.quantity)?;
        writeln!(out, "PRICE: {}", item.display_price())?;
        writeln!(out)?;
        writeln!(out, "BARCODE: {} ({})", item.barcode, spec.format.symbology())?;
        for line in bars::framed(&item.barcode) {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "{}", bars::NOT_SCANNABLE_NOTICE)?;

        let path = self.compositor.barcode_for(item)?;
        writeln!(out, "Scannable image: {}", path.display())?;
        rule(out, '=', RULE_WIDTH)?;
        Ok(())
    }

    /// Generate the barcode image and explain how to print it.
    /// With `send`, also hand it to the platform print command.
    pub fn print_barcode(
        &mut self,
        item_id: &str,
        send: bool,
        out: &mut impl Write,
    ) -> Result<(), ShelfError> {
        let catalog = self.catalog;
        let item = catalog.get(item_id)?;
        let path = self.compositor.barcode_for(item)?;

        writeln!(out)?;
        writeln!(
            out,
            "Barcode for {} ({}) generated at: {}",
            item.name,
            item.item_id,
            path.display()
        )?;
        self.write_print_help(&path, send, out)
    }

    fn write_print_help(&self, path: &Path, send: bool, out: &mut impl Write) -> Result<(), ShelfError> {
        if send {
            self.platform.print_file(path)?;
            writeln!(out, "Sent to printer via {}.", self.platform.name())?;
            return Ok(());
        }
        writeln!(out, "To print this image:")?;
        for line in self.platform.print_instructions(path) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Generate the QR image and show it downsampled in the terminal.
    /// Falls back to the file path when the preview can't be produced.
    pub fn show_qr(&mut self, item_id: &str, out: &mut impl Write) -> Result<(), ShelfError> {
        let catalog = self.catalog;
        let item = catalog.get(item_id)?;
        let path = symbol::render_qr(item, &self.compositor.dirs().barcodes)?;

        writeln!(out)?;
        writeln!(out, "QR code for {} ({}):", item.name, item.item_id)?;
        write_raster_preview(&path, out)
    }

    /// Compose one label. With `open`, show it in the platform viewer when
    /// a display is available.
    pub fn make_label(&mut self, item_id: &str, open: bool, out: &mut impl Write) -> Result<(), ShelfError> {
        let catalog = self.catalog;
        let item = catalog.get(item_id)?;
        let path = self.compositor.compose(item)?;
        writeln!(out, "Label for {} ({}) saved to {}", item.name, item.item_id, path.display())?;

        if open {
            if self.platform.has_graphical_display() {
                if let Err(e) = self.platform.open_file(&path) {
                    writeln!(out, "Could not open viewer ({}); open the file above manually.", e)?;
                }
            } else {
                writeln!(out, "No graphical display; open the file above to view it.")?;
            }
        }
        Ok(())
    }

    /// Compose a label and explain how to print it (or send it with `send`).
    pub fn print_label(&mut self, item_id: &str, send: bool, out: &mut impl Write) -> Result<(), ShelfError> {
        let catalog = self.catalog;
        let item = catalog.get(item_id)?;
        let path = self.compositor.compose(item)?;

        writeln!(out)?;
        writeln!(out, "Label for {} ({}) generated at: {}", item.name, item.item_id, path.display())?;
        self.write_print_help(&path, send, out)
    }

    /// Compose labels for the whole catalog or one category.
    pub fn make_labels(&mut self, category: Option<&str>, out: &mut impl Write) -> Result<(), ShelfError> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let report = label::compose_all(&mut self.compositor, self.catalog.items(), category);

        for path in &report.succeeded {
            writeln!(out, "  ok   {}", path.display())?;
        }
        for failure in &report.failures {
            writeln!(out, "  FAIL {}: {}", failure.item_id, failure.error)?;
        }
        writeln!(out, "{}", report)?;
        if report.succeeded_count() > 0 {
            writeln!(out, "Labels are in {}", self.compositor.dirs().labels.display())?;
        }
        Ok(())
    }
}
