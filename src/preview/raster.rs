//! Raster downsampling.
//!
//! Shrinks a generated image to a fixed number of terminal columns and
//! thresholds each pixel into one of the two glyph tones. Rows are scaled
//! by [`CELL_ASPECT`] because terminal cells are roughly twice as tall as
//! they are wide.

use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;

use super::{Glyph, GlyphGrid};
use crate::error::ShelfError;

/// Output columns, regardless of source size.
pub const PREVIEW_WIDTH: u32 = 40;

/// Row correction for non-square terminal cells.
pub const CELL_ASPECT: f32 = 0.55;

/// Half of the 8-bit intensity range; `intensity / HALF_RANGE` picks the tone.
const HALF_RANGE: u8 = 128;

/// Grid height for a source of the given size.
pub fn preview_height(src_width: u32, src_height: u32) -> u32 {
    if src_width == 0 {
        return 1;
    }
    let aspect = src_height as f32 / src_width as f32;
    ((PREVIEW_WIDTH as f32 * aspect * CELL_ASPECT).round() as u32).max(1)
}

/// Downsample an in-memory image.
pub fn downsample(source: &DynamicImage) -> GlyphGrid {
    let height = preview_height(source.width(), source.height());
    let small = source
        .resize_exact(PREVIEW_WIDTH, height, FilterType::Triangle)
        .to_luma8();

    let cells = small
        .pixels()
        .map(|p| Glyph::TONES[(p[0] / HALF_RANGE) as usize])
        .collect();
    GlyphGrid::new(PREVIEW_WIDTH as usize, height as usize, cells)
}

/// Load an image from disk and downsample it.
///
/// Load failures are reported as [`ShelfError::Render`]; callers fall back
/// to showing the file path.
pub fn downsample_file(path: &Path) -> Result<GlyphGrid, ShelfError> {
    let source = image::open(path).map_err(|e| {
        ShelfError::Render(format!("cannot load image '{}': {}", path.display(), e))
    })?;
    if source.width() == 0 || source.height() == 0 {
        return Err(ShelfError::Render(format!(
            "image '{}' is empty",
            path.display()
        )));
    }
    Ok(downsample(&source))
}
