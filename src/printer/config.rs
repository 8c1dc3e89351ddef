//! # Printer Configuration
//!
//! Physical description of a label printer and the labels loaded in it.
//!
//! ## Supported Printers
//!
//! | Model | Label | Resolution | Canvas (dots) |
//! |-------|-------|------------|---------------|
//! | RW402B | 2.25" × 1.25" | 203 DPI | 457 × 254 |
//!
//! ## Usage
//!
//! ```
//! use etiqueta::printer::PrinterConfig;
//!
//! let config = PrinterConfig::RW402B;
//! let layout = config.layout();
//! assert_eq!((layout.canvas_width, layout.canvas_height), (457, 254));
//! ```

use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;

/// # Printer Configuration
///
/// Every option a printer profile recognises, each with a default.
///
/// ## Fields and Their Effect
///
/// | Field | Default | Effect |
/// |-------|---------|--------|
/// | `dpi` | 203 | Converts inches to canvas dots |
/// | `label_width_in` | 2.25 | Canvas width before conversion |
/// | `label_height_in` | 1.25 | Canvas height before conversion |
/// | `bottom_margin` | 15 | Dots the spooler keeps clear at the label's trailing edge; not read by the zone planner |
/// | `min_font_size` | 10 | Lower bound of the font-fit search |
/// | `max_font_size` | 500 | Upper bound of the font-fit search |
/// | `border_margin` | 4 | Canvas edge to cut border |
/// | `border_thickness` | 6 | Cut border stroke |
///
/// ## Calculations
///
/// ```text
/// px = round(inches × dpi)
///
/// For RW402B:
///   2.25 × 203 = 456.75 → 457
///   1.25 × 203 = 253.75 → 254
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Resolution in dots per inch
    pub dpi: u32,

    /// Label width in inches
    pub label_width_in: f32,

    /// Label height in inches
    pub label_height_in: f32,

    /// Trailing-edge margin in dots
    pub bottom_margin: u32,

    /// Smallest font size in pixels
    pub min_font_size: u32,

    /// Largest font size in pixels
    pub max_font_size: u32,

    /// Distance from the canvas edge to the border, in dots
    pub border_margin: u32,

    /// Border stroke width in dots
    pub border_thickness: u32,
}

impl PrinterConfig {
    /// # RW402B Configuration
    ///
    /// 203 DPI direct-thermal label printer (TSPL over Bluetooth serial),
    /// loaded with 2.25" × 1.25" die-cut labels.
    pub const RW402B: Self = Self {
        dpi: 203,
        label_width_in: 2.25,
        label_height_in: 1.25,
        bottom_margin: 15,
        min_font_size: 10,
        max_font_size: 500,
        border_margin: 4,
        border_thickness: 6,
    };

    /// Convert inches to dots, rounding to the nearest dot.
    #[inline]
    pub fn inches_to_dots(&self, inches: f32) -> u32 {
        (inches * self.dpi as f32).round().max(0.0) as u32
    }

    /// Canvas size in dots: (width, height).
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.inches_to_dots(self.label_width_in),
            self.inches_to_dots(self.label_height_in),
        )
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Label width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.label_width_in * 25.4
    }

    /// Label height in millimeters
    #[inline]
    pub fn height_mm(&self) -> f32 {
        self.label_height_in * 25.4
    }

    /// Engine layout for this printer and label.
    pub fn layout(&self) -> LayoutConfig {
        let (width, height) = self.canvas_size();
        LayoutConfig::new(width, height)
            .with_border(self.border_margin, self.border_thickness)
            .with_font_sizes(self.min_font_size, self.max_font_size)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::RW402B
    }
}

// ============================================================================
// TESTS
// ============================================================================
