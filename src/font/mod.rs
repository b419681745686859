//! # Font Resolution
//!
//! Label text is drawn with the first font that loads from an ordered list
//! of [`FontSource`]s. The list always ends in the built-in Spleen bitmap
//! font, so resolution cannot fail.
//!
//! ```text
//! platform TrueType ──✗──► alternate TrueType ──✗──► built-in bitmap
//! ```

pub mod bitmap;
pub mod truetype;

use std::path::PathBuf;

use ab_glyph::FontVec;
use image::GrayImage;
use tracing::{debug, warn};

use crate::error::ShelfError;

/// Where a font can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A TrueType/OpenType file (the first face of a collection)
    TrueType(PathBuf),
    /// Spleen 6x12, compiled in
    Builtin,
}

impl FontSource {
    pub fn truetype(path: impl Into<PathBuf>) -> Self {
        FontSource::TrueType(path.into())
    }

    /// Try to load this source.
    pub fn load(&self) -> Result<TextFont, ShelfError> {
        match self {
            FontSource::TrueType(path) => {
                truetype::load(path).map(|font| TextFont::Outline(Box::new(font)))
            }
            FontSource::Builtin => Ok(TextFont::Bitmap),
        }
    }
}

/// The platform's usual sans-serif fonts, most preferred first, followed by
/// the built-in bitmap font.
pub fn default_sources() -> Vec<FontSource> {
    let candidates: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Windows\Fonts\arial.ttf",
            r"C:\Windows\Fonts\segoeui.ttf",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/Library/Fonts/Arial.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    } else {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        ]
    };

    candidates
        .iter()
        .map(|path| FontSource::truetype(*path))
        .chain(std::iter::once(FontSource::Builtin))
        .collect()
}

/// Resolve the first loadable source. Falls back to the bitmap font when
/// every source fails or the list is empty.
pub fn resolve(sources: &[FontSource]) -> TextFont {
    for source in sources {
        match source.load() {
            Ok(font) => {
                debug!(?source, "font resolved");
                return font;
            }
            Err(e) => debug!(?source, error = %e, "font source unavailable"),
        }
    }
    warn!("no font source loaded, using built-in bitmap font");
    TextFont::Bitmap
}

/// A loaded font ready to draw.
pub enum TextFont {
    Outline(Box<FontVec>),
    Bitmap,
}

impl std::fmt::Debug for TextFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextFont::Outline(_) => write!(f, "TextFont::Outline"),
            TextFont::Bitmap => write!(f, "TextFont::Bitmap"),
        }
    }
}

impl TextFont {
    pub fn is_bitmap(&self) -> bool {
        matches!(self, TextFont::Bitmap)
    }

    /// Width and height of `text` at `pixel_height`.
    pub fn measure(&self, text: &str, pixel_height: f32) -> (u32, u32) {
        match self {
            TextFont::Outline(font) => truetype::measure(font, text, pixel_height),
            TextFont::Bitmap => bitmap::measure(text, bitmap::scale_for(pixel_height)),
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn draw(&self, canvas: &mut GrayImage, text: &str, x: i32, y: i32, pixel_height: f32) {
        match self {
            TextFont::Outline(font) => truetype::draw(canvas, font, text, x, y, pixel_height),
            TextFont::Bitmap => bitmap::draw(canvas, text, x, y, bitmap::scale_for(pixel_height)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_end_with_builtin() {
        let sources = default_sources();
        assert!(sources.len() > 1);
        assert_eq!(sources.last(), Some(&FontSource::Builtin));
    }

    #[test]
    fn test_resolve_skips_missing_fonts() {
        let sources = vec![
            FontSource::truetype("/nonexistent/a.ttf"),
            FontSource::truetype("/nonexistent/b.ttf"),
            FontSource::Builtin,
        ];
        assert!(resolve(&sources).is_bitmap());
    }

    #[test]
    fn test_resolve_empty_list_falls_back() {
        assert!(resolve(&[]).is_bitmap());
    }

    #[test]
    fn test_bitmap_draws_ink() {
        let mut canvas = GrayImage::from_pixel(100, 30, image::Luma([255]));
        TextFont::Bitmap.draw(&mut canvas, "A001", 2, 2, 16.0);
        assert!(canvas.pixels().any(|p| p[0] == 0));
        assert_eq!(TextFont::Bitmap.measure("A001", 16.0), (24, 12));
    }
}
