//! Synthetic bar pattern.
//!
//! Derives bar and space widths straight from the code string so a preview
//! can be shown without decoding any image. The result looks like a
//! barcode but does not encode the value.
//!
//! For each character:
//!
//! ```text
//! digit       = numeric value, or code point mod 10 for non-digits
//! hash        = sum of all code points in the code
//! bar_width   = 1 + (digit + hash) mod 3
//! space_width = 1 + digit mod 2
//! ```
//!
//! The pattern is wrapped in a `█ █` start/stop marker.

use super::{Glyph, GlyphGrid};

/// Shown next to every synthetic preview.
pub const NOT_SCANNABLE_NOTICE: &str =
    "(terminal preview only, not scannable; use the generated image for scanning)";

/// Rows drawn in the framed preview.
pub const FRAMED_ROWS: usize = 6;

const MARKER: [Glyph; 3] = [Glyph::Filled, Glyph::Blank, Glyph::Filled];

fn content_hash(code: &str) -> u64 {
    code.chars().map(|c| c as u64).sum()
}

fn digit_value(c: char) -> u64 {
    match c.to_digit(10) {
        Some(d) => d as u64,
        None => c as u64 % 10,
    }
}

/// One row of the synthetic pattern, markers included.
pub fn pattern(code: &str) -> Vec<Glyph> {
    let hash = content_hash(code);
    let mut row = MARKER.to_vec();

    for c in code.chars() {
        let digit = digit_value(c);
        let bar_width = 1 + (digit + hash) % 3;
        let space_width = 1 + digit % 2;
        row.extend(std::iter::repeat_n(Glyph::Filled, bar_width as usize));
        row.extend(std::iter::repeat_n(Glyph::Blank, space_width as usize));
    }

    row.extend(MARKER);
    row
}

/// The pattern repeated over `height` rows.
pub fn pattern_grid(code: &str, height: usize) -> GlyphGrid {
    GlyphGrid::repeat_row(&pattern(code), height)
}

/// Pattern inside a box frame, with the code above and below the bars.
///
/// ```text
/// ┌──────────────┐
/// │    ABC123    │
/// │ █ ███ ... █ █ │
/// │    ABC123    │
/// └──────────────┘
/// ```
pub fn framed(code: &str) -> Vec<String> {
    let grid = pattern_grid(code, FRAMED_ROWS);
    let code_width = code.chars().count();
    let inner = grid.width().max(code_width);

    let centered = |text: &str, len: usize| {
        let left = (inner - len) / 2;
        let right = inner - len - left;
        format!("│ {}{}{} │", " ".repeat(left), text, " ".repeat(right))
    };

    let mut lines = Vec::with_capacity(FRAMED_ROWS + 4);
    lines.push(format!("┌{}┐", "─".repeat(inner + 2)));
    lines.push(centered(code, code_width));
    for row in grid.rows() {
        lines.push(centered(&row, grid.width()));
    }
    lines.push(centered(code, code_width));
    lines.push(format!("└{}┘", "─".repeat(inner + 2)));
    lines
}
