//! # Output Configuration
//!
//! This module defines the label geometry and the output directory layout.
//!
//! ## Label Geometry
//!
//! ```text
//! ┌──────────────────┬──────────────────┐  ─┐
//! │ item id          │ category         │   │ band_height (50)
//! ├──────────────────┴──────────────────┤  ─┤
//! │                                     │   │
//! │          ║│║║│║│║║│║│║║│            │   │ center band (150)
//! │                                     │   │
//! ├──────────────────┬──────────────────┤  ─┤
//! │ name             │ price            │   │ band_height (50)
//! └──────────────────┴──────────────────┘  ─┘
//!                  400 units
//! ```
//!
//! ## Usage
//!
//! ```
//! use shelfcode::config::LabelConfig;
//!
//! let config = LabelConfig::STANDARD;
//! assert_eq!(config.center_band_height(), 150);
//! ```

use std::path::{Path, PathBuf};

/// # Label Configuration
///
/// Fixed dimensions of a composed label, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelConfig {
    /// Canvas width
    pub width: u32,

    /// Canvas height
    pub height: u32,

    /// Height of the top and bottom text bands
    pub band_height: u32,

    /// Width of the outer border stroke
    pub border_width: u32,

    /// Width of the divider strokes
    pub divider_width: u32,

    /// Horizontal padding between a divider and quadrant text
    pub text_padding: u32,

    /// Margin kept clear around the embedded barcode
    pub barcode_margin: u32,

    /// Pixel height used for quadrant text
    pub text_px: f32,
}

impl LabelConfig {
    /// # Standard 400×250 Label
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Canvas | 400 × 250 |
    /// | Bands | 50 from top and bottom |
    /// | Border | 2 |
    /// | Dividers | 1 |
    pub const STANDARD: LabelConfig = LabelConfig {
        width: 400,
        height: 250,
        band_height: 50,
        border_width: 2,
        divider_width: 1,
        text_padding: 10,
        barcode_margin: 20,
        text_px: 16.0,
    };

    /// Height of the barcode band between the two dividers.
    pub const fn center_band_height(&self) -> u32 {
        self.height - 2 * self.band_height
    }

    /// X coordinate of the vertical divider.
    pub const fn midpoint(&self) -> u32 {
        self.width / 2
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Where generated images are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    /// Barcode and QR images (`<item_id>.png`, `QR_<item_id>.png`)
    pub barcodes: PathBuf,
    /// Composed labels
    pub labels: PathBuf,
}

impl OutputDirs {
    pub fn new(barcodes: impl Into<PathBuf>, labels: impl Into<PathBuf>) -> Self {
        Self {
            barcodes: barcodes.into(),
            labels: labels.into(),
        }
    }

    /// Both directories nested under a common root.
    pub fn under(root: &Path) -> Self {
        Self::new(root.join("barcodes"), root.join("labels"))
    }
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self::new("barcodes", "labels")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_geometry() {
        let config = LabelConfig::STANDARD;
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 250);
        assert_eq!(config.midpoint(), 200);
        assert_eq!(config.center_band_height(), 150);
    }

    #[test]
    fn test_output_dirs_under_root() {
        let dirs = OutputDirs::under(Path::new("/tmp/out"));
        assert_eq!(dirs.barcodes, PathBuf::from("/tmp/out/barcodes"));
        assert_eq!(dirs.labels, PathBuf::from("/tmp/out/labels"));
    }
}
