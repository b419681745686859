//! Built-in bitmap font.
//!
//! Uses the Spleen 6x12 bitmap font, compiled into the binary, so text can
//! always be drawn even when no system font is installed.

use image::{GrayImage, Luma};
use spleen_font::{FONT_6X12, PSF2Font};

pub const CHAR_WIDTH: u32 = 6;
pub const CHAR_HEIGHT: u32 = 12;

/// Integer scale for a requested pixel height (never below 1).
pub fn scale_for(pixel_height: f32) -> u32 {
    ((pixel_height / CHAR_HEIGHT as f32).round() as u32).max(1)
}

/// Size of `text` at `scale`.
pub fn measure(text: &str, scale: u32) -> (u32, u32) {
    let chars = text.chars().count() as u32;
    (chars * CHAR_WIDTH * scale, CHAR_HEIGHT * scale)
}

/// Generate a glyph bitmap for a character.
/// Returns `CHAR_WIDTH * CHAR_HEIGHT` cells, 1 = ink.
pub fn glyph(ch: char) -> Vec<u8> {
    let mut cells = vec![0u8; (CHAR_WIDTH * CHAR_HEIGHT) as usize];
    let width = CHAR_WIDTH as usize;

    let mut buf = [0u8; 4];
    let found = match PSF2Font::new(FONT_6X12) {
        Ok(mut spleen) => match spleen.glyph_for_utf8(ch.encode_utf8(&mut buf).as_bytes()) {
            Some(spleen_glyph) => {
                for (row_y, row) in spleen_glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        let idx = row_y * width + col_x;
                        if idx < cells.len() && col_x < width {
                            cells[idx] = on as u8;
                        }
                    }
                }
                true
            }
            None => false,
        },
        Err(_) => false,
    };

    if !found && ch != ' ' {
        draw_box(&mut cells, width, CHAR_HEIGHT as usize);
    }
    cells
}

/// Draw `text` with its top-left corner at (`x`, `y`), clipped to the canvas.
pub fn draw(canvas: &mut GrayImage, text: &str, x: i32, y: i32, scale: u32) {
    let scale = scale.max(1) as i32;
    let mut pen_x = x;

    for ch in text.chars() {
        let cells = glyph(ch);
        for gy in 0..CHAR_HEIGHT as i32 {
            for gx in 0..CHAR_WIDTH as i32 {
                if cells[(gy * CHAR_WIDTH as i32 + gx) as usize] == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        put(canvas, pen_x + gx * scale + dx, y + gy * scale + dy);
                    }
                }
            }
        }
        pen_x += CHAR_WIDTH as i32 * scale;
    }
}

fn put(canvas: &mut GrayImage, x: i32, y: i32) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, Luma([0]));
    }
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
