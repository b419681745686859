//! Label geometry and text placement.

use crate::catalog::InventoryItem;
use crate::config::LabelConfig;
use crate::font::TextFont;

/// Names longer than this are shortened on the label.
pub const NAME_MAX_CHARS: usize = 24;
/// Characters kept before the ellipsis when a name is shortened.
pub const NAME_KEEP_CHARS: usize = 22;
pub const ELLIPSIS: &str = "...";

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inset(&self, dx: u32, dy: u32) -> Rect {
        Rect::new(
            self.x + dx,
            self.y + dy,
            self.width.saturating_sub(2 * dx),
            self.height.saturating_sub(2 * dy),
        )
    }
}

/// Text regions around the barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];
}

/// Partition of the canvas into four text quadrants and a barcode band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub config: LabelConfig,
}

impl LabelLayout {
    pub fn new(config: LabelConfig) -> Self {
        Self { config }
    }

    pub fn canvas(&self) -> Rect {
        Rect::new(0, 0, self.config.width, self.config.height)
    }

    /// Y of the upper and lower horizontal dividers.
    pub fn divider_rows(&self) -> (u32, u32) {
        (
            self.config.band_height,
            self.config.height - self.config.band_height,
        )
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> Rect {
        let c = &self.config;
        let mid = c.midpoint();
        let (_, lower) = self.divider_rows();
        match quadrant {
            Quadrant::TopLeft => Rect::new(0, 0, mid, c.band_height),
            Quadrant::TopRight => Rect::new(mid, 0, c.width - mid, c.band_height),
            Quadrant::BottomLeft => Rect::new(0, lower, mid, c.band_height),
            Quadrant::BottomRight => Rect::new(mid, lower, c.width - mid, c.band_height),
        }
    }

    /// The band between the dividers.
    pub fn center(&self) -> Rect {
        Rect::new(
            0,
            self.config.band_height,
            self.config.width,
            self.config.center_band_height(),
        )
    }

    /// Where the barcode may be drawn: the center band minus the margins.
    pub fn barcode_area(&self) -> Rect {
        let margin = self.config.barcode_margin;
        self.center().inset(margin, margin / 4)
    }

    /// Pixels per module for a symbol `total_modules` wide (quiet zone
    /// included).
    ///
    /// The largest whole number that fits the barcode area. A symbol too
    /// wide for the area at one pixel per module may spread into the side
    /// margins, up to the border. `None` when it can't fit at all.
    pub fn module_width_for(&self, total_modules: u32) -> Option<u32> {
        if total_modules == 0 {
            return None;
        }
        let area = self.barcode_area();
        if total_modules <= area.width {
            return Some(area.width / total_modules);
        }
        (total_modules <= self.inner_width()).then_some(1)
    }

    /// Canvas width inside the border.
    pub fn inner_width(&self) -> u32 {
        self.config.width - 2 * self.config.border_width
    }

    /// Top-left corner for a barcode image, centered in the barcode area,
    /// or across the canvas when it is wider than the area.
    pub fn barcode_origin(&self, width: u32, height: u32) -> (u32, u32) {
        let area = self.barcode_area();
        let x = if width <= area.width {
            area.x + (area.width - width) / 2
        } else {
            self.config.width.saturating_sub(width) / 2
        };
        (x, area.y + area.height.saturating_sub(height) / 2)
    }

    /// Resolve where each quadrant's text goes for `item`.
    pub fn place_text(&self, item: &InventoryItem, font: &TextFont) -> Vec<TextPlacement> {
        let texts = LabelText::from_item(item);
        Quadrant::ALL
            .iter()
            .map(|&quadrant| {
                let region = self.quadrant(quadrant);
                let max_width = region.width.saturating_sub(2 * self.config.text_padding);
                let text = fit_width(texts.get(quadrant), max_width, font, self.config.text_px);
                let (_, text_height) = font.measure(&text, self.config.text_px);

                TextPlacement {
                    quadrant,
                    x: region.x + self.config.text_padding,
                    y: region.y + region.height.saturating_sub(text_height) / 2,
                    text,
                }
            })
            .collect()
    }
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self::new(LabelConfig::STANDARD)
    }
}

/// The four strings printed on a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelText {
    pub item_id: String,
    pub category: String,
    pub name: String,
    pub price: String,
}

impl LabelText {
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            item_id: format!("ID: {}", item.item_id),
            category: item.category.clone(),
            name: shorten_name(&item.name),
            price: item.display_price(),
        }
    }

    pub fn get(&self, quadrant: Quadrant) -> &str {
        match quadrant {
            Quadrant::TopLeft => &self.item_id,
            Quadrant::TopRight => &self.category,
            Quadrant::BottomLeft => &self.name,
            Quadrant::BottomRight => &self.price,
        }
    }
}

/// A string positioned on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPlacement {
    pub quadrant: Quadrant,
    pub text: String,
    pub x: u32,
    pub y: u32,
}

/// Names over [`NAME_MAX_CHARS`] become their first [`NAME_KEEP_CHARS`]
/// characters plus an ellipsis.
pub fn shorten_name(name: &str) -> String {
    if name.chars().count() > NAME_MAX_CHARS {
        let kept: String = name.chars().take(NAME_KEEP_CHARS).collect();
        format!("{}{}", kept, ELLIPSIS)
    } else {
        name.to_string()
    }
}

/// Drop trailing characters until `text` fits `max_width`, marking the cut
/// with an ellipsis. Outline fonts are wider than the bitmap font, so this
/// keeps proportional text from crossing the vertical divider.
fn fit_width(text: &str, max_width: u32, font: &TextFont, pixel_height: f32) -> String {
    if font.measure(text, pixel_height).0 <= max_width {
        return text.to_string();
    }

    let base = text.strip_suffix(ELLIPSIS).unwrap_or(text);
    let mut chars: Vec<char> = base.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}{}", chars.iter().collect::<String>(), ELLIPSIS);
        if font.measure(&candidate, pixel_height).0 <= max_width {
            return candidate;
        }
    }
    String::new()
}
