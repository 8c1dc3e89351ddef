//! # Rotated Text Renderer
//!
//! Draws one fitted text block into a zone at any of the four rotations.
//!
//! ## Pipeline
//!
//! ```text
//! FitResult ──► render_block ──► rotate ──► stamp (mask < 128, clipped)
//!               (upright, bold      (lossless      (only glyph pixels
//!                before rotation)    quarter turns)  reach the canvas)
//! ```
//!
//! Every rotation, including 0°, goes through the same off-screen block. The
//! block is the text's own bounding box plus a small margin, lines centered
//! horizontally and stacked with [`LINE_SPACING`]. After rotation the block is
//! centered on the zone and only pixels darker than the mask threshold are
//! copied, so antialiasing and the block background never touch the canvas.
//!
//! ## Bold
//!
//! Bold weight is simulated by drawing the glyphs at the eight one-pixel
//! neighbours of the true position, then at the true position. It happens in
//! the upright block so the thickened strokes rotate with the glyphs.

use image::{GrayImage, Luma, imageops};

use super::canvas::{INK_THRESHOLD, LabelCanvas, WHITE};
use crate::layout::{Rect, Rotation, Zone};
use crate::text::{FitResult, FontFace, LINE_SPACING, TextMetrics};

/// Blank border around the text inside the off-screen block.
pub const BLOCK_MARGIN: u32 = 2;

/// Extra room bold text needs on each axis (one pixel per side).
pub const BOLD_GROWTH: i32 = 2;

const BOLD_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Render the fitted lines upright into a fresh white buffer.
///
/// The buffer is `max_line_width + 2·margin` wide and
/// `total_height + 2·margin` tall.
pub fn render_block(face: &FontFace, fit: &FitResult, bold: bool) -> GrayImage {
    let margin = BLOCK_MARGIN;
    let mut block = GrayImage::from_pixel(
        fit.max_line_width + 2 * margin,
        fit.total_height + 2 * margin,
        Luma([WHITE]),
    );

    let mut y = margin as i32;
    for line in &fit.lines {
        let extent = face.measure(line, fit.font_size);
        let x = (margin + (fit.max_line_width - extent.width.min(fit.max_line_width)) / 2) as i32;

        if bold {
            for (dx, dy) in BOLD_OFFSETS {
                face.draw_line(line, fit.font_size, &mut block, x + dx, y + dy);
            }
        }
        face.draw_line(line, fit.font_size, &mut block, x, y);

        y += (extent.height + LINE_SPACING) as i32;
    }

    block
}

/// Rotate a block by a lossless quarter-turn multiple.
pub fn rotate(block: &GrayImage, rotation: Rotation) -> GrayImage {
    match rotation {
        Rotation::None => block.clone(),
        Rotation::Cw90 => imageops::rotate90(block),
        Rotation::Half => imageops::rotate180(block),
        Rotation::Ccw90 => imageops::rotate270(block),
    }
}

/// Copy the ink of `block` onto the canvas with its top-left at `origin`.
///
/// Pixels outside `clip` are dropped.
pub fn stamp(canvas: &mut LabelCanvas, block: &GrayImage, origin: (i32, i32), clip: &Rect) {
    for (bx, by, pixel) in block.enumerate_pixels() {
        if pixel.0[0] < INK_THRESHOLD {
            canvas.ink(origin.0 + bx as i32, origin.1 + by as i32, clip);
        }
    }
}

/// Draw `fit` into `zone` at the zone's rotation, never inking outside `clip`.
///
/// Returns the canvas rectangle the rotated block was centered at, or `None`
/// when there was nothing to draw.
pub fn render(
    canvas: &mut LabelCanvas,
    zone: &Zone,
    face: &FontFace,
    fit: &FitResult,
    bold: bool,
    clip: &Rect,
) -> Option<Rect> {
    if fit.is_blank() {
        return None;
    }

    let block = rotate(&render_block(face, fit, bold), zone.rotation);
    let (w, h) = (block.width() as i32, block.height() as i32);
    let (x, y) = zone.rect.centered_origin(w, h);

    tracing::trace!(
        zone = ?zone.id,
        rotation = zone.rotation.degrees(),
        size = fit.font_size,
        lines = fit.lines.len(),
        x,
        y,
        "stamping text block"
    );

    stamp(canvas, &block, (x, y), clip);
    Some(Rect::new(x, y, x + w, y + h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ZoneId;
    use crate::text::fit;
    use pretty_assertions::assert_eq;

    fn fitted(text: &str, w: i32, h: i32) -> FitResult {
        fit(&FontFace::builtin(), text, w, h, 10, 200)
    }

    fn zone(rotation: Rotation, rect: Rect) -> Zone {
        Zone {
            id: ZoneId::Middle,
            rect,
            rotation,
        }
    }

    fn ink_count(image: &GrayImage) -> usize {
        image.pixels().filter(|p| p.0[0] < INK_THRESHOLD).count()
    }

    #[test]
    fn test_block_size_includes_margin() {
        let fit = fitted("Hello", 200, 40);
        let block = render_block(&FontFace::builtin(), &fit, false);
        assert_eq!(block.width(), fit.max_line_width + 2 * BLOCK_MARGIN);
        assert_eq!(block.height(), fit.total_height + 2 * BLOCK_MARGIN);
        assert!(ink_count(&block) > 0);
    }

    #[test]
    fn test_bold_adds_ink() {
        let face = FontFace::builtin();
        let fit = fitted("Bold", 200, 40);
        let plain = ink_count(&render_block(&face, &fit, false));
        let bold = ink_count(&render_block(&face, &fit, true));
        assert!(bold > plain);
    }

    #[test]
    fn test_half_turn_round_trip() {
        let face = FontFace::builtin();
        let fit = fitted("Round trip", 300, 60);
        for bold in [false, true] {
            let upright = render_block(&face, &fit, bold);
            let twice = rotate(&rotate(&upright, Rotation::Half), Rotation::Half);
            assert_eq!(twice, upright);
        }
    }

    #[test]
    fn test_quarter_turns_compose() {
        let face = FontFace::builtin();
        let upright = render_block(&face, &fitted("Side", 200, 40), false);
        let cw = rotate(&upright, Rotation::Cw90);
        assert_eq!((cw.width(), cw.height()), (upright.height(), upright.width()));
        assert_eq!(rotate(&cw, Rotation::Ccw90), upright);
        assert_eq!(rotate(&cw, Rotation::Cw90), rotate(&upright, Rotation::Half));
    }

    #[test]
    fn test_render_centers_block_in_zone() {
        let face = FontFace::builtin();
        let rect = Rect::new(20, 30, 220, 90);
        let fit = fitted("Hi", rect.width() - BOLD_GROWTH, rect.height() - BOLD_GROWTH);
        let mut canvas = LabelCanvas::new(240, 120);
        let clip = canvas.bounds();

        let placed =
            render(&mut canvas, &zone(Rotation::None, rect), &face, &fit, false, &clip).unwrap();
        let ink = canvas.ink_bounds().unwrap();

        assert!(rect.contains_rect(&ink), "{} not inside {}", ink, rect);
        let left = placed.x0 - rect.x0;
        let right = rect.x1 - placed.x1;
        assert!((left - right).abs() <= 1);
    }

    #[test]
    fn test_render_180_matches_rotated_upright() {
        let face = FontFace::builtin();
        let rect = Rect::new(0, 0, 200, 60);
        let fit = fitted("Birthday", rect.width(), rect.height());

        let mut upright = LabelCanvas::new(200, 60);
        render(&mut upright, &zone(Rotation::None, rect), &face, &fit, false, &rect);
        let mut flipped = LabelCanvas::new(200, 60);
        render(&mut flipped, &zone(Rotation::Half, rect), &face, &fit, false, &rect);

        // Both blocks are centered in the same even-sized zone, so a half turn
        // of the whole canvas maps one onto the other when the block's slack
        // splits evenly.
        let block = render_block(&face, &fit, false);
        if (200 - block.width() as i32) % 2 == 0 && (60 - block.height() as i32) % 2 == 0 {
            assert_eq!(imageops::rotate180(upright.as_image()), *flipped.as_image());
        }
        assert_eq!(
            ink_count(upright.as_image()),
            ink_count(flipped.as_image())
        );
    }

    #[test]
    fn test_render_clips_to_rect() {
        let face = FontFace::builtin();
        let rect = Rect::new(10, 10, 40, 30);
        // Overflowing fit: far bigger than the zone.
        let fit = fitted("Overflowing text", 400, 200);
        let mut canvas = LabelCanvas::new(60, 40);
        let clip = Rect::new(10, 10, 50, 30);

        render(&mut canvas, &zone(Rotation::Cw90, rect), &face, &fit, true, &clip);
        assert_eq!(canvas.ink_in(&canvas.bounds()), canvas.ink_in(&clip));
    }

    #[test]
    fn test_blank_fit_draws_nothing() {
        let mut canvas = LabelCanvas::new(50, 50);
        let placed = render(
            &mut canvas,
            &zone(Rotation::None, Rect::new(0, 0, 50, 50)),
            &FontFace::builtin(),
            &FitResult::empty(10),
            true,
            &Rect::new(0, 0, 50, 50),
        );
        assert_eq!(placed, None);
        assert_eq!(canvas.ink_bounds(), None);
    }
}
