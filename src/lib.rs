//! # Shelfcode - Warehouse Barcode and Label Library
//!
//! Shelfcode turns a read-only inventory catalog into scannable symbols and
//! printable shelf labels. It provides:
//!
//! - **Symbology selection**: EAN-13 for 12/13-digit codes, Code 128 otherwise
//! - **Image output**: barcode and QR PNGs written per item
//! - **Label composition**: 400×250 labels with four text quadrants and a barcode band
//! - **Terminal previews**: synthetic bar patterns and downsampled block art
//!
//! ## Quick Start
//!
//! ```no_run
//! use shelfcode::{
//!     catalog::Catalog,
//!     config::OutputDirs,
//!     label::{self, Compositor},
//!     preview::bars,
//! };
//!
//! let catalog = Catalog::load("items.csv")?;
//! let item = catalog.get("A001")?;
//!
//! // Terminal approximation (not scannable)
//! for line in bars::framed(&item.barcode) {
//!     println!("{}", line);
//! }
//!
//! // Printable labels for one category
//! let mut compositor = Compositor::new(OutputDirs::default());
//! let report = label::compose_all(&mut compositor, catalog.items(), Some("Tools"));
//! println!("{}", report);
//!
//! # Ok::<(), shelfcode::ShelfError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | CSV loading and item lookup |
//! | [`symbol`] | Symbology selection, encoding, image output |
//! | [`preview`] | Terminal glyph grids |
//! | [`label`] | Label layout, composition, bulk runs |
//! | [`font`] | TrueType and built-in bitmap text |
//! | [`platform`] | Open/print integration |
//! | [`console`] | User-facing operations and the menu |
//! | [`error`] | Error types |

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod files;
pub mod font;
pub mod label;
pub mod platform;
pub mod preview;
pub mod symbol;

// Re-exports for convenience
pub use catalog::{Catalog, InventoryItem};
pub use config::{LabelConfig, OutputDirs};
pub use error::ShelfError;
pub use label::Compositor;
pub use symbol::{SymbolFormat, SymbolSpec};
