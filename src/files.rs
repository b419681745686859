//! # Output File Layout
//!
//! Path derivation for generated images and the PNG writer shared by every
//! stage.
//!
//! ```text
//! barcodes/<item_id>.png
//! barcodes/QR_<item_id>.png
//! labels/label_<item_id>_<short_name>_<barcode>.png
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use tracing::debug;

use crate::error::ShelfError;

/// Characters kept from a label name.
pub const SHORT_NAME_LEN: usize = 20;

/// Filename prefix of QR images.
pub const QR_PREFIX: &str = "QR_";

/// Replace every character that isn't alphanumeric, space, `-` or `_` with `_`.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Name fragment used in label filenames.
///
/// Sanitizes first, then keeps the first [`SHORT_NAME_LEN`] characters.
/// Two names that differ only after the cut, or only in characters that
/// sanitize to `_`, map to the same fragment.
pub fn short_name(name: &str) -> String {
    sanitize(name).chars().take(SHORT_NAME_LEN).collect()
}

/// `<dir>/<item_id>.png`
pub fn barcode_path(dir: &Path, item_id: &str) -> PathBuf {
    dir.join(format!("{}.png", sanitize(item_id)))
}

/// `<dir>/QR_<item_id>.png`
pub fn qr_path(dir: &Path, item_id: &str) -> PathBuf {
    dir.join(format!("{}{}.png", QR_PREFIX, sanitize(item_id)))
}

/// `<dir>/label_<item_id>_<short_name>_<barcode>.png`
pub fn label_path(dir: &Path, item_id: &str, name: &str, barcode: &str) -> PathBuf {
    dir.join(format!(
        "label_{}_{}_{}.png",
        sanitize(item_id),
        short_name(name),
        sanitize(barcode)
    ))
}

/// Create `dir` and its parents if missing.
///
/// Failures are [`ShelfError::Encoding`]: they belong to the item being
/// written, not to the session.
pub fn ensure_dir(dir: &Path) -> Result<(), ShelfError> {
    fs::create_dir_all(dir).map_err(|e| {
        ShelfError::Encoding(format!("cannot create directory '{}': {}", dir.display(), e))
    })
}

/// Encode `img` as PNG at `path`, replacing any existing file.
///
/// The image goes to a hidden sibling first and is renamed into place,
/// so a failed encode never leaves a file under the final name.
pub fn save_png(img: &GrayImage, path: &Path) -> Result<(), ShelfError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ShelfError::Encoding(format!("no file name in '{}'", path.display())))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    if let Err(e) = img.save_with_format(&tmp, ImageFormat::Png) {
        let _ = fs::remove_file(&tmp);
        return Err(ShelfError::Encoding(format!(
            "failed to write PNG '{}': {}",
            path.display(),
            e
        )));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(ShelfError::Encoding(format!(
            "failed to move PNG into place at '{}': {}",
            path.display(),
            e
        )));
    }
    debug!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Bolt 10mm/hex (x100)"), "Bolt 10mm_hex _x100_");
        assert_eq!(sanitize("keep-this_one"), "keep-this_one");
    }

    #[test]
    fn test_short_name_sanitizes_then_truncates() {
        assert_eq!(short_name("Heavy-Duty Pallet Jack #3"), "Heavy-Duty Pallet Ja");
        assert_eq!(short_name("a/b").len(), 3);
        // Both collapse to the same 20-character fragment
        assert_eq!(
            short_name("Extra Long Product Name A"),
            short_name("Extra Long Product Name B")
        );
    }

    #[test]
    fn test_paths() {
        let dir = Path::new("out");
        assert_eq!(barcode_path(dir, "A001"), PathBuf::from("out/A001.png"));
        assert_eq!(qr_path(dir, "A001"), PathBuf::from("out/QR_A001.png"));
        assert_eq!(
            label_path(dir, "A001", "Widget", "012345678905"),
            PathBuf::from("out/label_A001_Widget_012345678905.png")
        );
    }

    #[test]
    fn test_save_png_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.png");
        save_png(&GrayImage::new(4, 4), &path).unwrap();
        save_png(&GrayImage::new(8, 2), &path).unwrap();

        let reread = image::open(&path).unwrap();
        assert_eq!((reread.width(), reread.height()), (8, 2));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_failures_are_encoding_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("labels");
        fs::write(&blocker, b"not a directory").unwrap();

        assert!(matches!(ensure_dir(&blocker), Err(ShelfError::Encoding(_))));
        assert!(matches!(
            save_png(&GrayImage::new(2, 2), &blocker.join("x.png")),
            Err(ShelfError::Encoding(_))
        ));

        // A directory where the PNG should go makes the rename fail
        let occupied = dir.path().join("taken.png");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), b"x").unwrap();
        assert!(matches!(
            save_png(&GrayImage::new(2, 2), &occupied),
            Err(ShelfError::Encoding(_))
        ));
        assert!(!dir.path().join(".taken.png.tmp").exists());
    }
}
