//! # Error Types
//!
//! This module defines error types used throughout the shelfcode library.
//!
//! Only [`ShelfError::CatalogLoad`] is fatal; everything else is reported
//! at the operation boundary and control returns to the caller.

use thiserror::Error;

/// Main error type for shelfcode operations
#[derive(Debug, Error)]
pub enum ShelfError {
    /// The catalog could not be read or parsed
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// No item matched an id or name query
    #[error("Not found: {0}")]
    NotFound(String),

    /// The symbology rejected the value, or the image encode failed
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Terminal rasterization or font loading failed
    #[error("Render error: {0}")]
    Render(String),

    /// The platform open/print command failed or is unavailable
    #[error("Platform error: {0}")]
    Platform(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShelfError {
    /// Whether this error should terminate the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShelfError::CatalogLoad(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_catalog_load_is_fatal() {
        assert!(ShelfError::CatalogLoad("missing".into()).is_fatal());
        assert!(!ShelfError::NotFound("A001".into()).is_fatal());
        assert!(!ShelfError::Encoding("bad".into()).is_fatal());
        assert!(!ShelfError::Render("bad".into()).is_fatal());
    }

    #[test]
    fn test_display_prefixes() {
        let err = ShelfError::Encoding("EAN-13 rejected 'X'".into());
        assert_eq!(err.to_string(), "Encoding error: EAN-13 rejected 'X'");
    }
}
