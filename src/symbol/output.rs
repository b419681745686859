//! Symbol image generation.
//!
//! Draws encoded modules into a grayscale raster with a quiet zone and the
//! human-readable value underneath, then writes it as PNG.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};
use serde::Serialize;
use tracing::info;

use super::SymbolSpec;
use super::encode::encode;
use crate::catalog::InventoryItem;
use crate::error::ShelfError;
use crate::files;
use crate::font::bitmap;

/// Pixels per barcode module in standalone images.
pub const MODULE_WIDTH: u32 = 2;
/// Blank modules on each side of the bars.
pub const QUIET_ZONE: u32 = 10;
const BAR_HEIGHT: u32 = 100;
/// Gap between the bars and the human-readable text.
const TEXT_GAP: u32 = 6;
const BOTTOM_MARGIN: u32 = 8;

/// Pixels per QR module.
const QR_CELL: u32 = 8;
/// QR quiet zone in modules.
const QR_BORDER: u32 = 4;

/// Render `spec` and write it to `<destination_dir>/<item_id>.png`.
///
/// Creates the directory if needed and overwrites any previous image for
/// the same item.
pub fn render(item_id: &str, spec: &SymbolSpec, destination_dir: &Path) -> Result<PathBuf, ShelfError> {
    let modules = encode(spec)?;
    let img = draw_linear(&modules, &spec.human_readable());

    files::ensure_dir(destination_dir)?;
    let path = files::barcode_path(destination_dir, item_id);
    files::save_png(&img, &path)?;

    info!(
        item_id,
        symbology = spec.format.symbology(),
        path = %path.display(),
        "barcode image written"
    );
    Ok(path)
}

/// Draw bars at [`MODULE_WIDTH`] with the value centered underneath.
pub fn draw_linear(modules: &[bool], text: &str) -> GrayImage {
    draw_linear_at(modules, text, MODULE_WIDTH)
}

/// Draw bars with `module_width` pixels per module.
///
/// Every module maps to a whole number of pixels, so no bar is lost or
/// merged at any width. The height does not depend on `module_width`.
pub fn draw_linear_at(modules: &[bool], text: &str, module_width: u32) -> GrayImage {
    let module_width = module_width.max(1);
    let (text_width, text_height) = bitmap::measure(text, 1);
    let bars_width = (modules.len() as u32 + 2 * QUIET_ZONE) * module_width;
    let width = bars_width.max(text_width + 2 * QUIET_ZONE);
    let height = QUIET_ZONE + BAR_HEIGHT + TEXT_GAP + text_height + BOTTOM_MARGIN;

    let mut img = GrayImage::from_pixel(width, height, Luma([255]));
    let start_x = (width - modules.len() as u32 * module_width) / 2;

    for (i, &bar) in modules.iter().enumerate() {
        if !bar {
            continue;
        }
        for dx in 0..module_width {
            for y in QUIET_ZONE..QUIET_ZONE + BAR_HEIGHT {
                img.put_pixel(start_x + i as u32 * module_width + dx, y, Luma([0]));
            }
        }
    }

    let text_x = (width - text_width) / 2;
    bitmap::draw(
        &mut img,
        text,
        text_x as i32,
        (QUIET_ZONE + BAR_HEIGHT + TEXT_GAP) as i32,
        1,
    );
    img
}

/// What a QR image carries.
#[derive(Debug, Serialize)]
struct QrPayload<'a> {
    item_id: &'a str,
    name: &'a str,
    category: &'a str,
    barcode: &'a str,
}

/// JSON text encoded into an item's QR image.
pub fn qr_payload(item: &InventoryItem) -> Result<String, ShelfError> {
    serde_json::to_string(&QrPayload {
        item_id: &item.item_id,
        name: &item.name,
        category: &item.category,
        barcode: &item.barcode,
    })
    .map_err(|e| ShelfError::Encoding(format!("QR payload: {}", e)))
}

/// Render the item's QR code to `<destination_dir>/QR_<item_id>.png`.
pub fn render_qr(item: &InventoryItem, destination_dir: &Path) -> Result<PathBuf, ShelfError> {
    let payload = qr_payload(item)?;
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
        .map_err(|e| ShelfError::Encoding(format!("QR code generation failed: {}", e)))?;
    let img = draw_qr(&code);

    files::ensure_dir(destination_dir)?;
    let path = files::qr_path(destination_dir, &item.item_id);
    files::save_png(&img, &path)?;

    info!(item_id = %item.item_id, path = %path.display(), "QR image written");
    Ok(path)
}

fn draw_qr(code: &QrCode) -> GrayImage {
    let qr_size = code.width() as u32;
    let side = (qr_size + 2 * QR_BORDER) * QR_CELL;
    let mut img = GrayImage::from_pixel(side, side, Luma([255]));

    for qy in 0..qr_size {
        for qx in 0..qr_size {
            if code[(qx as usize, qy as usize)] != Color::Dark {
                continue;
            }
            let x0 = (qx + QR_BORDER) * QR_CELL;
            let y0 = (qy + QR_BORDER) * QR_CELL;
            for cy in 0..QR_CELL {
                for cx in 0..QR_CELL {
                    img.put_pixel(x0 + cx, y0 + cy, Luma([0]));
                }
            }
        }
    }
    img
}
