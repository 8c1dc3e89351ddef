//! Font faces: TrueType via `ab_glyph`, or the built-in Spleen bitmap font.
//!
//! A [`FontFace`] both measures text (through [`TextMetrics`]) and draws it
//! into a grayscale buffer. TrueType faces are reference-counted and
//! read-only, so one loaded face can be cloned into as many concurrent
//! renders as needed.
//!
//! ## Built-in Bitmap Font
//!
//! When no TrueType asset is available the engine falls back to Spleen
//! glyphs, scaled with nearest-neighbour sampling to any pixel size:
//!
//! | Size (px) | Source glyphs | Cell |
//! |-----------|---------------|------|
//! | < 18      | Spleen 6×12   | ⌈size/2⌉ × size |
//! | ≥ 18      | Spleen 12×24  | ⌈size/2⌉ × size |

use std::fmt;
use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::GrayImage;
use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};

use super::metrics::{TextExtent, TextMetrics};
use crate::error::{EngineWarning, EtiquetaError};

/// Sizes below this use the small Spleen source glyphs.
const SMALL_SOURCE_LIMIT: u32 = 18;

/// A loaded font, ready to measure and draw.
#[derive(Clone)]
pub enum FontFace {
    /// Outline font parsed by `ab_glyph`.
    TrueType(FontArc),
    /// Built-in Spleen bitmap font.
    Bitmap,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFace::TrueType(font) => {
                write!(f, "FontFace::TrueType({} glyphs)", font.glyph_count())
            }
            FontFace::Bitmap => write!(f, "FontFace::Bitmap"),
        }
    }
}

impl FontFace {
    /// Load a TrueType/OpenType font from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EtiquetaError> {
        let path = path.as_ref();
        let font_load = |reason: String| EtiquetaError::FontLoad {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| font_load(e.to_string()))?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| font_load(e.to_string()))?;
        Ok(FontFace::TrueType(font))
    }

    /// The built-in bitmap font. Always available.
    pub fn builtin() -> Self {
        FontFace::Bitmap
    }

    /// Load `path`, or fall back to the built-in font with a warning.
    ///
    /// `None` selects the built-in font without a warning.
    pub fn load_or_builtin(path: Option<&Path>) -> (Self, Option<EngineWarning>) {
        let Some(path) = path else {
            return (FontFace::Bitmap, None);
        };
        match FontFace::load(path) {
            Ok(face) => (face, None),
            Err(e) => {
                let reason = match e {
                    EtiquetaError::FontLoad { reason, .. } => reason,
                    other => other.to_string(),
                };
                tracing::warn!(
                    path = %path.display(),
                    %reason,
                    "font unavailable, using built-in bitmap font"
                );
                (
                    FontFace::Bitmap,
                    Some(EngineWarning::FontFallback {
                        path: path.to_path_buf(),
                        reason,
                    }),
                )
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontFace::Bitmap)
    }

    /// Draw one line of text with its layout box's top-left at `(x, y)`.
    ///
    /// Glyph coverage darkens the existing pixels (0 = black, 255 = white);
    /// anything falling outside `image` is dropped.
    pub fn draw_line(&self, text: &str, size: u32, image: &mut GrayImage, x: i32, y: i32) {
        match self {
            FontFace::TrueType(font) => draw_ttf_line(font, text, size, image, x, y),
            FontFace::Bitmap => draw_bitmap_line(text, size, image, x, y),
        }
    }
}

impl TextMetrics for FontFace {
    fn measure(&self, text: &str, size: u32) -> TextExtent {
        match self {
            FontFace::TrueType(font) => {
                let (_, width) = ttf_layout(font, text, size);
                let scaled = font.as_scaled(PxScale::from(size as f32));
                TextExtent {
                    width: width.max(0.0).ceil() as u32,
                    height: (scaled.ascent() - scaled.descent()).ceil().max(0.0) as u32,
                    baseline: scaled.ascent().ceil().max(0.0) as u32,
                }
            }
            FontFace::Bitmap => {
                let size = size.max(1);
                TextExtent {
                    width: (text.chars().count() as u32).saturating_mul(bitmap_advance(size)),
                    height: size,
                    baseline: size - size / 6,
                }
            }
        }
    }
}

// ============================================================================
// TRUETYPE
// ============================================================================

/// Glyph ids with their caret x positions, plus the total advance width.
fn ttf_layout(font: &FontArc, text: &str, size: u32) -> (Vec<(GlyphId, f32)>, f32) {
    let scaled = font.as_scaled(PxScale::from(size as f32));
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut previous: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        glyphs.push((id, caret));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    (glyphs, caret)
}

fn draw_ttf_line(font: &FontArc, text: &str, size: u32, image: &mut GrayImage, x: i32, y: i32) {
    let scale = PxScale::from(size as f32);
    let ascent = font.as_scaled(scale).ascent();
    let (glyphs, _) = ttf_layout(font, text, size);
    let (width, height) = image.dimensions();

    for (id, caret) in glyphs {
        let glyph = id.with_scale_and_position(scale, point(x as f32 + caret, y as f32 + ascent));
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = gx as i32 + bounds.min.x as i32;
            let py = gy as i32 + bounds.min.y as i32;
            if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                return;
            }
            let ink = (255.0 * (1.0 - coverage.clamp(0.0, 1.0))).round() as u8;
            let pixel = image.get_pixel_mut(px as u32, py as u32);
            pixel.0[0] = pixel.0[0].min(ink);
        });
    }
}

// ============================================================================
// BITMAP (SPLEEN)
// ============================================================================

/// Horizontal advance of one bitmap cell at `size`.
#[inline]
fn bitmap_advance(size: u32) -> u32 {
    size.div_ceil(2).max(1)
}

/// Source glyph set for a target size: (font data, width, height).
fn spleen_source(size: u32) -> (&'static [u8], usize, usize) {
    if size < SMALL_SOURCE_LIMIT {
        (FONT_6X12, 6, 12)
    } else {
        (FONT_12X24, 12, 24)
    }
}

/// Source bitmap for `ch`, row-major, `true` = ink. `None` if Spleen lacks the glyph.
fn spleen_glyph(ch: char, data: &'static [u8], w: usize, h: usize) -> Option<Vec<bool>> {
    let mut font = PSF2Font::new(data).ok()?;
    let mut utf8 = [0u8; 4];
    let glyph = font.glyph_for_utf8(ch.encode_utf8(&mut utf8).as_bytes())?;

    let mut bits = vec![false; w * h];
    for (row_y, row) in glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < h && col_x < w {
                bits[row_y * w + col_x] = on;
            }
        }
    }
    Some(bits)
}

/// Outline box for characters the bitmap font does not cover.
fn box_glyph(w: usize, h: usize) -> Vec<bool> {
    let mut bits = vec![false; w * h];
    for x in 1..w.saturating_sub(1) {
        bits[2 * w + x] = true;
        bits[(h - 2) * w + x] = true;
    }
    for y in 2..h - 1 {
        bits[y * w + 1] = true;
        bits[y * w + w.saturating_sub(2)] = true;
    }
    bits
}

fn draw_bitmap_line(text: &str, size: u32, image: &mut GrayImage, x: i32, y: i32) {
    let size = size.max(1);
    let advance = bitmap_advance(size);
    let (data, sw, sh) = spleen_source(size);
    let (width, height) = image.dimensions();

    for (i, ch) in text.chars().enumerate() {
        if ch == ' ' {
            continue;
        }
        let bits = spleen_glyph(ch, data, sw, sh).unwrap_or_else(|| box_glyph(sw, sh));
        let cell_x = x + (i as u32 * advance) as i32;

        // Nearest-neighbour scale from the source cell to advance × size.
        for dy in 0..size {
            let py = y + dy as i32;
            if py < 0 || py >= height as i32 {
                continue;
            }
            let sy = dy as usize * sh / size as usize;
            for dx in 0..advance {
                let px = cell_x + dx as i32;
                if px < 0 || px >= width as i32 {
                    continue;
                }
                let sx = dx as usize * sw / advance as usize;
                if bits[sy * sw + sx] {
                    image.put_pixel(px as u32, py as u32, image::Luma([0]));
                }
            }
        }
    }
}
