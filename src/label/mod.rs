//! # Label Composition
//!
//! Builds a printable 400×250 label per item: a bordered canvas split into
//! four text quadrants around a center band holding the item's barcode.
//!
//! ## Example
//!
//! ```no_run
//! use shelfcode::catalog::Catalog;
//! use shelfcode::config::OutputDirs;
//! use shelfcode::label::Compositor;
//!
//! let catalog = Catalog::load("items.csv")?;
//! let mut compositor = Compositor::new(OutputDirs::default());
//!
//! let path = compositor.compose(catalog.get("A001")?)?;
//! println!("Label written to {}", path.display());
//! # Ok::<(), shelfcode::ShelfError>(())
//! ```

pub mod batch;
pub mod layout;

pub use batch::{BatchFailure, BatchReport, compose_all};
pub use layout::{LabelLayout, LabelText, Quadrant, Rect, TextPlacement};

use std::collections::HashMap;
use std::path::PathBuf;

use image::imageops;
use image::{GrayImage, Luma};
use tracing::{debug, info};

use crate::catalog::InventoryItem;
use crate::config::{LabelConfig, OutputDirs};
use crate::error::ShelfError;
use crate::files;
use crate::font::{self, FontSource, TextFont};
use crate::symbol::{self, encode, output};

/// Composes labels and remembers which barcode images it already generated.
pub struct Compositor {
    layout: LabelLayout,
    dirs: OutputDirs,
    font: TextFont,
    /// Generated image → the (item_id, barcode) it was drawn for, this
    /// session only. Distinct ids can sanitize to the same file name.
    barcodes: HashMap<PathBuf, (String, String)>,
}

impl Compositor {
    /// Compositor with the standard layout and the platform font list.
    pub fn new(dirs: OutputDirs) -> Self {
        Self::with_fonts(dirs, &font::default_sources())
    }

    /// Compositor resolving its font from `sources`.
    pub fn with_fonts(dirs: OutputDirs, sources: &[FontSource]) -> Self {
        Self {
            layout: LabelLayout::new(LabelConfig::STANDARD),
            dirs,
            font: font::resolve(sources),
            barcodes: HashMap::new(),
        }
    }

    pub fn font(&self) -> &TextFont {
        &self.font
    }

    pub fn dirs(&self) -> &OutputDirs {
        &self.dirs
    }

    /// Barcode image for `item`, generated on first request.
    ///
    /// Reused only while the file on disk still holds this item's symbol;
    /// if another item has since written the same path, it is redrawn.
    pub fn barcode_for(&mut self, item: &InventoryItem) -> Result<PathBuf, ShelfError> {
        let path = files::barcode_path(&self.dirs.barcodes, &item.item_id);
        let owner = (item.item_id.clone(), item.barcode.clone());
        if self.barcodes.get(&path) == Some(&owner) && path.exists() {
            debug!(item_id = %item.item_id, "reusing barcode image");
            return Ok(path);
        }

        let spec = symbol::select(&item.barcode);
        let written = symbol::render(&item.item_id, &spec, &self.dirs.barcodes)?;
        self.barcodes.insert(written.clone(), owner);
        Ok(written)
    }

    /// The item's symbol drawn at a whole number of pixels per module, as
    /// wide as the barcode area allows.
    fn label_barcode(&self, item: &InventoryItem) -> Result<GrayImage, ShelfError> {
        let spec = symbol::select(&item.barcode);
        let modules = encode::encode(&spec)?;
        let total = modules.len() as u32 + 2 * output::QUIET_ZONE;
        let module_width = self.layout.module_width_for(total).ok_or_else(|| {
            ShelfError::Encoding(format!(
                "'{}' needs {} modules, more than a {}px label can hold",
                item.barcode,
                total,
                self.layout.inner_width()
            ))
        })?;
        Ok(output::draw_linear_at(&modules, &spec.human_readable(), module_width))
    }

    /// Render the label for `item` in memory.
    pub fn render(&mut self, item: &InventoryItem) -> Result<GrayImage, ShelfError> {
        self.barcode_for(item)?;
        let barcode = self.label_barcode(item)?;

        let config = self.layout.config;
        let mut canvas = GrayImage::from_pixel(config.width, config.height, Luma([255]));
        draw_frame(&mut canvas, &self.layout);

        for placement in self.layout.place_text(item, &self.font) {
            self.font.draw(
                &mut canvas,
                &placement.text,
                placement.x as i32,
                placement.y as i32,
                config.text_px,
            );
        }

        let (x, y) = self.layout.barcode_origin(barcode.width(), barcode.height());
        imageops::replace(&mut canvas, &barcode, x as i64, y as i64);

        Ok(canvas)
    }

    /// Compose the label for `item` and write it under the label directory.
    ///
    /// Nothing is written unless the whole label renders.
    pub fn compose(&mut self, item: &InventoryItem) -> Result<PathBuf, ShelfError> {
        let canvas = self.render(item)?;

        files::ensure_dir(&self.dirs.labels)?;
        let path = files::label_path(&self.dirs.labels, &item.item_id, &item.name, &item.barcode);
        files::save_png(&canvas, &path)?;

        info!(item_id = %item.item_id, path = %path.display(), "label written");
        Ok(path)
    }
}

/// Compose one label with a fresh compositor.
pub fn compose(item: &InventoryItem, dirs: &OutputDirs) -> Result<PathBuf, ShelfError> {
    Compositor::new(dirs.clone()).compose(item)
}

fn fill(canvas: &mut GrayImage, rect: Rect) {
    let x_end = (rect.x + rect.width).min(canvas.width());
    let y_end = (rect.y + rect.height).min(canvas.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            canvas.put_pixel(x, y, Luma([0]));
        }
    }
}

/// Border around the canvas, the two horizontal dividers, and the vertical
/// divider through the top and bottom bands.
fn draw_frame(canvas: &mut GrayImage, layout: &LabelLayout) {
    let c = layout.config;
    let b = c.border_width;
    let d = c.divider_width;

    fill(canvas, Rect::new(0, 0, c.width, b));
    fill(canvas, Rect::new(0, c.height - b, c.width, b));
    fill(canvas, Rect::new(0, 0, b, c.height));
    fill(canvas, Rect::new(c.width - b, 0, b, c.height));

    let (upper, lower) = layout.divider_rows();
    fill(canvas, Rect::new(0, upper, c.width, d));
    fill(canvas, Rect::new(0, lower, c.width, d));

    let mid = c.midpoint();
    fill(canvas, Rect::new(mid, 0, d, upper));
    fill(canvas, Rect::new(mid, lower, d, c.height - lower));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn item(id: &str, barcode: &str) -> InventoryItem {
        InventoryItem {
            item_id: id.into(),
            name: "Widget".into(),
            category: "Tools".into(),
            quantity: "10".into(),
            unit_price: "4.99".into(),
            barcode: barcode.into(),
            expiry_date: None,
        }
    }

    fn compositor(root: &Path) -> Compositor {
        Compositor::with_fonts(OutputDirs::under(root), &[FontSource::Builtin])
    }

    #[test]
    fn test_frame_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = compositor(dir.path()).render(&item("A001", "012345678905")).unwrap();

        assert_eq!(canvas.dimensions(), (400, 250));
        // Border
        assert_eq!(canvas.get_pixel(1, 125)[0], 0);
        assert_eq!(canvas.get_pixel(398, 125)[0], 0);
        // Dividers
        assert_eq!(canvas.get_pixel(100, 50)[0], 0);
        assert_eq!(canvas.get_pixel(100, 200)[0], 0);
        assert_eq!(canvas.get_pixel(200, 25)[0], 0);
        assert_eq!(canvas.get_pixel(200, 225)[0], 0);
        // No vertical divider through the barcode margin
        assert_eq!(canvas.get_pixel(200, 52)[0], 255);
    }

    #[test]
    fn test_barcode_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut compositor = compositor(dir.path());
        let widget = item("A001", "012345678905");

        let first = compositor.barcode_for(&widget).unwrap();
        let modified = std::fs::metadata(&first).unwrap().modified().unwrap();
        let second = compositor.barcode_for(&widget).unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::metadata(&second).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn test_compose_writes_named_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = compositor(dir.path()).compose(&item("A001", "012345678905")).unwrap();

        assert_eq!(
            path,
            dir.path().join("labels/label_A001_Widget_012345678905.png")
        );
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (400, 250));
        assert!(dir.path().join("barcodes/A001.png").exists());
    }

    #[test]
    fn test_failed_barcode_leaves_no_label() {
        let dir = tempfile::tempdir().unwrap();
        let err = compositor(dir.path()).compose(&item("A002", "ÆØÅ-1")).unwrap_err();

        assert!(matches!(err, ShelfError::Encoding(_)));
        assert!(!dir.path().join("labels").exists());
    }

    #[test]
    fn test_render_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let mut compositor = compositor(dir.path());
        let widget = item("A001", "ABC123");
        let a = compositor.render(&widget).unwrap();
        let b = compositor.render(&widget).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    fn bar_runs(bars: impl IntoIterator<Item = bool>) -> usize {
        let mut runs = 0;
        let mut previous = false;
        for bar in bars {
            if bar && !previous {
                runs += 1;
            }
            previous = bar;
        }
        runs
    }

    #[test]
    fn test_label_keeps_every_bar() {
        let dir = tempfile::tempdir().unwrap();
        let mut compositor = compositor(dir.path());

        for code in ["012345678905", "ABC123", "PALLET-2024-WAREHOUSE-B-0000017"] {
            let modules = encode::encode(&symbol::select(code)).unwrap();
            let canvas = compositor.render(&item("A001", code)).unwrap();

            let border = compositor.layout.config.border_width;
            let row = (border..canvas.width() - border).map(|x| canvas.get_pixel(x, 115)[0] == 0);
            assert_eq!(bar_runs(row), bar_runs(modules.iter().copied()), "{}", code);
        }
    }

    #[test]
    fn test_symbol_too_wide_for_label() {
        let dir = tempfile::tempdir().unwrap();
        let long = "X".repeat(40);
        let err = compositor(dir.path()).compose(&item("A001", &long)).unwrap_err();
        assert!(matches!(err, ShelfError::Encoding(_)));
        assert!(!dir.path().join("labels").exists());
    }

    #[test]
    fn test_ids_sharing_a_file_name_get_their_own_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let mut compositor = compositor(dir.path());
        let slash = item("A/1", "012345678905");
        let underscore = item("A_1", "WIDE-CODE-128-VALUE");

        let first = compositor.barcode_for(&slash).unwrap();
        let ean_width = image::open(&first).unwrap().width();
        let other = compositor.barcode_for(&underscore).unwrap();
        assert_eq!(first, other);
        assert_ne!(image::open(&other).unwrap().width(), ean_width);

        let again = compositor.barcode_for(&slash).unwrap();
        assert_eq!(image::open(&again).unwrap().width(), ean_width);
    }

    #[test]
    fn test_free_compose() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::under(dir.path());
        let path = compose(&item("A001", "ABC123"), &dirs).unwrap();

        assert_eq!(path, dirs.labels.join("label_A001_Widget_ABC123.png"));
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (400, 250));
    }
}
