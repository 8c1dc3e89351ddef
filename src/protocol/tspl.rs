//! # TSPL Label Commands
//!
//! Encodes a finished label canvas as a TSPL job for label printers such as
//! the RW402B.
//!
//! ## Job Layout
//!
//! ```text
//! SIZE 57.15 mm,31.75 mm\r\n
//! GAP 3.00 mm,0\r\n
//! DENSITY 8\r\n
//! SPEED 4\r\n
//! DIRECTION 1\r\n
//! CLS\r\n
//! BITMAP 0,0,58,254,0,<58 × 254 raw bytes>\r\n
//! PRINT 1\r\n
//! ```
//!
//! ## Bitmap Packing
//!
//! One bit per dot, rows top to bottom, MSB = leftmost dot, 1 = black:
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! ```
//!
//! Many TSPL printers treat a set bit as "leave white" instead, so the
//! packed bytes are inverted by default ([`TsplConfig::invert`]).

use serde::{Deserialize, Serialize};

use crate::printer::PrinterConfig;
use crate::render::LabelCanvas;
use crate::render::dither::pack_row;

/// Line terminator for every TSPL command.
pub const CRLF: &[u8] = b"\r\n";

/// Job parameters that are not part of the label geometry.
///
/// | Field | Default | Command |
/// |-------|---------|---------|
/// | `gap_mm` | 3.0 | `GAP` |
/// | `density` | 8 | `DENSITY` (0-15) |
/// | `speed` | 4 | `SPEED` (inches/s) |
/// | `direction` | 1 | `DIRECTION` |
/// | `invert` | true | bit sense of `BITMAP` data |
/// | `x`, `y` | 0 | `BITMAP` origin in dots |
/// | `mode` | 0 | `BITMAP` mode (0 = overwrite) |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsplConfig {
    pub gap_mm: f32,
    pub density: u8,
    pub speed: u8,
    pub direction: u8,
    pub invert: bool,
    pub x: u32,
    pub y: u32,
    pub mode: u8,
}

impl Default for TsplConfig {
    fn default() -> Self {
        Self {
            gap_mm: 3.0,
            density: 8,
            speed: 4,
            direction: 1,
            invert: true,
            x: 0,
            y: 0,
            mode: 0,
        }
    }
}

/// Packed 1-bpp raster ready for a `BITMAP` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    /// Bytes per row, `ceil(width / 8)`.
    pub width_bytes: u32,
    /// Number of rows.
    pub height: u32,
    /// `width_bytes × height` bytes.
    pub data: Vec<u8>,
}

/// Threshold the canvas at 128 and pack it row by row.
///
/// ## Example
///
/// ```
/// use etiqueta::protocol::tspl;
/// use etiqueta::render::LabelCanvas;
///
/// let bitmap = tspl::pack_bitmap(&LabelCanvas::new(12, 3), false);
/// assert_eq!((bitmap.width_bytes, bitmap.height), (2, 3));
/// assert!(bitmap.data.iter().all(|&b| b == 0));
/// ```
pub fn pack_bitmap(canvas: &LabelCanvas, invert: bool) -> PackedBitmap {
    let width = canvas.width();
    let height = canvas.height();
    let width_bytes = width.div_ceil(8);
    let mut data = Vec::with_capacity((width_bytes * height) as usize);

    let mut row = Vec::with_capacity(width as usize);
    for y in 0..height {
        row.clear();
        row.extend((0..width).map(|x| canvas.is_black(x, y)));
        data.extend(pack_row(&row));
    }

    if invert {
        for byte in &mut data {
            *byte = !*byte;
        }
    }

    PackedBitmap {
        width_bytes,
        height,
        data,
    }
}

/// # SIZE m mm,n mm
pub fn size(width_mm: f32, height_mm: f32) -> Vec<u8> {
    command(format!("SIZE {:.2} mm,{:.2} mm", width_mm, height_mm))
}

/// # GAP m mm,0
pub fn gap(gap_mm: f32) -> Vec<u8> {
    command(format!("GAP {:.2} mm,0", gap_mm))
}

/// # DENSITY n
pub fn density(n: u8) -> Vec<u8> {
    command(format!("DENSITY {}", n))
}

/// # SPEED n
pub fn speed(n: u8) -> Vec<u8> {
    command(format!("SPEED {}", n))
}

/// # DIRECTION n
pub fn direction(n: u8) -> Vec<u8> {
    command(format!("DIRECTION {}", n))
}

/// # CLS
///
/// Clears the printer's image buffer.
pub fn cls() -> Vec<u8> {
    command("CLS".to_string())
}

/// # BITMAP x,y,width_bytes,height,mode,data
///
/// The header is ASCII; the raster follows as raw bytes, then CRLF.
pub fn bitmap(x: u32, y: u32, mode: u8, bitmap: &PackedBitmap) -> Vec<u8> {
    let header = format!(
        "BITMAP {},{},{},{},{},",
        x, y, bitmap.width_bytes, bitmap.height, mode
    );
    let mut cmd = Vec::with_capacity(header.len() + bitmap.data.len() + CRLF.len());
    cmd.extend_from_slice(header.as_bytes());
    cmd.extend_from_slice(&bitmap.data);
    cmd.extend_from_slice(CRLF);
    cmd
}

/// # PRINT n
pub fn print(copies: u32) -> Vec<u8> {
    command(format!("PRINT {}", copies))
}

/// Build a complete job printing `copies` copies of `canvas`.
///
/// Rows beyond the printer's label height are cut off.
pub fn encode(
    canvas: &LabelCanvas,
    printer: &PrinterConfig,
    tspl: &TsplConfig,
    copies: u32,
) -> Vec<u8> {
    let mut packed = pack_bitmap(canvas, tspl.invert);
    let (_, label_rows) = printer.canvas_size();
    if packed.height > label_rows {
        packed.height = label_rows;
        packed.data.truncate((packed.width_bytes * label_rows) as usize);
    }

    let mut job = Vec::new();
    job.extend(size(printer.width_mm(), printer.height_mm()));
    job.extend(gap(tspl.gap_mm));
    job.extend(density(tspl.density));
    job.extend(speed(tspl.speed));
    job.extend(direction(tspl.direction));
    job.extend(cls());
    job.extend(bitmap(tspl.x, tspl.y, tspl.mode, &packed));
    job.extend(print(copies.max(1)));
    job
}

fn command(text: String) -> Vec<u8> {
    let mut cmd = text.into_bytes();
    cmd.extend_from_slice(CRLF);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================
