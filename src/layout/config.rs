//! Engine-level layout configuration.
//!
//! A [`LayoutConfig`] is built once (usually from a
//! [`PrinterConfig`](crate::printer::PrinterConfig)) and passed by reference
//! into every planning and rendering call. Nothing in the engine keeps
//! process-wide defaults.

use super::Rect;

/// Inner padding between the printable area and each zone, in dots.
pub const ZONE_PADDING: i32 = 3;

/// Gap between the side-caption zones and the top/bottom bands, in dots.
pub const SIDE_CAPTION_PADDING: i32 = 6;

/// Extra vertical padding inside the top/bottom zones for the border message.
pub const BORDER_TEXT_PADDING: i32 = 4;

/// Padding on each side of a side caption's line height, across its column.
pub const SIDE_TEXT_PADDING: i32 = 4;

/// Immutable geometry and font bounds for one label size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Canvas width in dots
    pub canvas_width: u32,
    /// Canvas height in dots
    pub canvas_height: u32,
    /// Distance from the canvas edge to the outer edge of the cut border
    pub border_margin: u32,
    /// Stroke width of the cut border
    pub border_thickness: u32,
    /// Smallest font size the fit search will settle on
    pub min_font_size: u32,
    /// Largest font size the fit search will try
    pub max_font_size: u32,
    pub zone_padding: i32,
    pub side_caption_padding: i32,
    pub border_text_padding: i32,
    pub side_text_padding: i32,
}

impl LayoutConfig {
    /// Layout for a canvas of the given size with default border and font bounds.
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            border_margin: 4,
            border_thickness: 6,
            min_font_size: 10,
            max_font_size: 500,
            zone_padding: ZONE_PADDING,
            side_caption_padding: SIDE_CAPTION_PADDING,
            border_text_padding: BORDER_TEXT_PADDING,
            side_text_padding: SIDE_TEXT_PADDING,
        }
    }

    pub fn with_border(mut self, margin: u32, thickness: u32) -> Self {
        self.border_margin = margin;
        self.border_thickness = thickness;
        self
    }

    pub fn with_font_sizes(mut self, min: u32, max: u32) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    /// Offset of the printable area from each canvas edge.
    #[inline]
    pub fn border_offset(&self) -> i32 {
        (self.border_margin + self.border_thickness) as i32
    }

    /// Canvas rectangle minus border margin and thickness.
    ///
    /// May be empty for labels smaller than twice the border offset.
    pub fn printable_area(&self) -> Rect {
        let offset = self.border_offset();
        Rect::of_size(self.canvas_width, self.canvas_height).inset(offset, offset)
    }
}

impl Default for LayoutConfig {
    /// 2.25" × 1.25" at 203 DPI.
    fn default() -> Self {
        Self::new(457, 254)
    }
}
