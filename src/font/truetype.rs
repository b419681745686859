//! TrueType text rendering.
//!
//! Renders text with ab_glyph into anti-aliased coverage and composites it
//! onto a grayscale canvas (darkening only, so overlapping glyphs and
//! existing lines are preserved).

use std::path::Path;

use ab_glyph::{Font, FontVec, GlyphId, PxScaleFont, ScaleFont};
use image::{GrayImage, Luma};

use crate::error::ShelfError;

/// Load a font file. For a `.ttc` collection the first face is used.
pub fn load(path: &Path) -> Result<FontVec, ShelfError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ShelfError::Render(format!("cannot read font '{}': {}", path.display(), e)))?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| ShelfError::Render(format!("invalid font '{}': {}", path.display(), e)))
}

fn layout(font: &FontVec, text: &str, pixel_height: f32) -> (Vec<(GlyphId, f32)>, f32) {
    let scaled: PxScaleFont<&FontVec> = font.as_scaled(pixel_height);
    let mut glyphs = Vec::new();
    let mut caret_x = 0.0f32;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        glyphs.push((glyph_id, caret_x));
        caret_x += scaled.h_advance(glyph_id);
    }

    (glyphs, caret_x)
}

/// Size of `text` at `pixel_height`: advance width by line height.
pub fn measure(font: &FontVec, text: &str, pixel_height: f32) -> (u32, u32) {
    let (_, width) = layout(font, text, pixel_height);
    let scaled = font.as_scaled(pixel_height);
    let line_height = (scaled.ascent() - scaled.descent()).ceil();
    (width.ceil() as u32, line_height.max(1.0) as u32)
}

/// Draw `text` with the top of its line box at (`x`, `y`).
pub fn draw(canvas: &mut GrayImage, font: &FontVec, text: &str, x: i32, y: i32, pixel_height: f32) {
    let (glyphs, _) = layout(font, text, pixel_height);
    let baseline_y = font.as_scaled(pixel_height).ascent();

    for (glyph_id, glyph_x) in glyphs {
        let glyph = glyph_id.with_scale_and_position(
            pixel_height,
            ab_glyph::point(x as f32 + glyph_x, y as f32 + baseline_y),
        );

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let cx = px as i32 + bounds.min.x as i32;
                let cy = py as i32 + bounds.min.y as i32;

                if cx >= 0 && cy >= 0 && (cx as u32) < canvas.width() && (cy as u32) < canvas.height() {
                    let ink = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                    let pixel = canvas.get_pixel_mut(cx as u32, cy as u32);
                    *pixel = Luma([pixel[0].min(255 - ink)]);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_font() {
        let err = load(Path::new("/nonexistent/font.ttf")).unwrap_err();
        assert!(matches!(err, ShelfError::Render(_)));
    }

    #[test]
    fn test_load_garbage_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(matches!(load(&path), Err(ShelfError::Render(_))));
    }
}
