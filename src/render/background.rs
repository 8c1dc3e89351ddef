//! # Background Image Compositor
//!
//! Places an optional background picture beneath the text layers.
//!
//! The image is decoded from in-memory bytes, converted to grayscale, cropped
//! from its top-left corner to the target area (never scaled), dithered to
//! black/white and pasted centered in the area:
//!
//! ```text
//!  decoded image           area              canvas
//! ┌────────────────┐     ┌────────┐     ┌──────────────┐
//! │ kept    │ crop │ ──► │  kept  │ ──► │  ┌────────┐  │
//! │─────────┘      │     └────────┘     │  │  kept  │  │
//! │   cropped away │                    │  └────────┘  │
//! └────────────────┘                    └──────────────┘
//! ```

use image::imageops;

use super::canvas::{INK_THRESHOLD, LabelCanvas};
use super::dither::dither_gray;
use crate::error::EngineWarning;
use crate::layout::Rect;

/// Decode `bytes` and composite them centered inside `area`.
///
/// Returns the canvas rectangle the image occupies.
///
/// ## Errors
///
/// [`EngineWarning::BackgroundSkipped`] when the bytes are not a decodable
/// image or the area is empty. The canvas is left untouched in that case.
pub fn composite(
    canvas: &mut LabelCanvas,
    area: &Rect,
    bytes: &[u8],
) -> Result<Rect, EngineWarning> {
    if area.is_empty() {
        return Err(EngineWarning::BackgroundSkipped {
            reason: "no printable area".to_string(),
        });
    }

    let decoded = image::load_from_memory(bytes).map_err(|e| EngineWarning::BackgroundSkipped {
        reason: e.to_string(),
    })?;
    let gray = decoded.to_luma8();

    let w = gray.width().min(area.width() as u32);
    let h = gray.height().min(area.height() as u32);
    if w < gray.width() || h < gray.height() {
        tracing::debug!(
            from = %format!("{}x{}", gray.width(), gray.height()),
            to = %format!("{}x{}", w, h),
            "cropping background"
        );
    }
    let cropped = imageops::crop_imm(&gray, 0, 0, w, h).to_image();
    let dithered = dither_gray(&cropped);

    let (x0, y0) = area.centered_origin(w as i32, h as i32);
    for (x, y, pixel) in dithered.enumerate_pixels() {
        if pixel.0[0] < INK_THRESHOLD {
            canvas.ink(x0 + x as i32, y0 + y as i32, area);
        }
    }

    Ok(Rect::new(x0, y0, x0 + w as i32, y0 + h as i32))
}
