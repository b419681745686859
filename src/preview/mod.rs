//! # Terminal Previews
//!
//! Two-tone glyph grids for showing symbols in a monospace terminal.
//!
//! ## Modes
//!
//! - [`bars`]: a synthetic bar pattern derived from the code string alone.
//!   It is cosmetic and cannot be scanned.
//! - [`raster`]: a generated image downsampled to a fixed-width grid
//!   (used for QR codes).
//!
//! Grids are plain values: [`GlyphGrid::rows`] can be iterated any number
//! of times and yields the same rows each time.
//!
//! ## Example
//!
//! ```
//! use shelfcode::preview::bars;
//!
//! let grid = bars::pattern_grid("ABC123", 3);
//! let rows: Vec<String> = grid.rows().collect();
//! assert_eq!(rows.len(), 3);
//! assert!(rows[0].starts_with("█ █"));
//! ```

pub mod bars;
pub mod raster;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Filled,
    Blank,
}

impl Glyph {
    /// The two output glyphs, indexed by tone.
    pub const TONES: [Glyph; 2] = [Glyph::Filled, Glyph::Blank];

    pub fn as_char(&self) -> char {
        match self {
            Glyph::Filled => '█',
            Glyph::Blank => ' ',
        }
    }
}

/// Fixed-size grid of glyphs, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    width: usize,
    height: usize,
    cells: Vec<Glyph>,
}

impl GlyphGrid {
    /// Build a grid from row-major cells. `cells.len()` must be `width * height`.
    pub fn new(width: usize, height: usize, cells: Vec<Glyph>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// A grid whose rows are all `row`.
    pub fn repeat_row(row: &[Glyph], height: usize) -> Self {
        let cells = row
            .iter()
            .copied()
            .cycle()
            .take(row.len() * height)
            .collect();
        Self::new(row.len(), height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Glyph> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Rows rendered as strings, top to bottom.
    pub fn rows(&self) -> Rows<'_> {
        Rows { grid: self, next: 0 }
    }
}

/// Iterator over the rows of a [`GlyphGrid`].
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    grid: &'a GlyphGrid,
    next: usize,
}

impl Iterator for Rows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next >= self.grid.height {
            return None;
        }
        let start = self.next * self.grid.width;
        self.next += 1;
        Some(
            self.grid.cells[start..start + self.grid.width]
                .iter()
                .map(Glyph::as_char)
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.grid.height - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Rows<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_row() {
        let grid = GlyphGrid::repeat_row(&[Glyph::Filled, Glyph::Blank], 3);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(0, 2), Some(Glyph::Filled));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_rows_are_restartable() {
        let grid = GlyphGrid::repeat_row(&[Glyph::Filled, Glyph::Blank, Glyph::Filled], 2);
        let first: Vec<String> = grid.rows().collect();
        let second: Vec<String> = grid.rows().collect();
        assert_eq!(first, vec!["█ █".to_string(), "█ █".to_string()]);
        assert_eq!(first, second);
        assert_eq!(grid.rows().len(), 2);
    }
}
