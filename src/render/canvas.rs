//! # Label Canvas
//!
//! The single-channel raster a render produces. Pixels are stored as 8-bit
//! grayscale but only ever hold 0 (black, print a dot) or 255 (white).
//!
//! The composer owns the canvas mutably while it renders; callers only get
//! read access to the finished raster.

use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::EtiquetaError;
use crate::layout::Rect;

/// Value of an inked pixel.
pub const BLACK: u8 = 0;

/// Value of a blank pixel.
pub const WHITE: u8 = 255;

/// Pixels darker than this count as ink when thresholding.
pub const INK_THRESHOLD: u8 = 128;

/// Monochrome label raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCanvas {
    image: GrayImage,
}

impl LabelCanvas {
    /// A blank (all white) canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([WHITE])),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whole-canvas rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::of_size(self.width(), self.height())
    }

    /// Pixel value at (x, y), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    #[inline]
    pub fn is_black(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).is_some_and(|v| v < INK_THRESHOLD)
    }

    /// Row-major pixel bytes, `width × height` long.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    /// Number of inked pixels inside `rect`.
    pub fn ink_in(&self, rect: &Rect) -> usize {
        let r = rect.intersection(&self.bounds());
        if r.is_empty() {
            return 0;
        }
        (r.y0..r.y1)
            .flat_map(|y| (r.x0..r.x1).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_black(x as u32, y as u32))
            .count()
    }

    /// Tight bounding box of all ink inside `rect`, if any.
    pub fn ink_bounds_in(&self, rect: &Rect) -> Option<Rect> {
        let r = rect.intersection(&self.bounds());
        let mut found: Option<Rect> = None;
        for y in r.y0..r.y1 {
            for x in r.x0..r.x1 {
                if !self.is_black(x as u32, y as u32) {
                    continue;
                }
                found = Some(match found {
                    None => Rect::new(x, y, x + 1, y + 1),
                    Some(b) => {
                        Rect::new(b.x0.min(x), b.y0.min(y), b.x1.max(x + 1), b.y1.max(y + 1))
                    }
                });
            }
        }
        found
    }

    /// Tight bounding box of all ink on the canvas.
    pub fn ink_bounds(&self) -> Option<Rect> {
        self.ink_bounds_in(&self.bounds())
    }

    /// Write the canvas as a PNG preview.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), EtiquetaError> {
        self.image.save(path.as_ref())?;
        Ok(())
    }

    // ========================================================================
    // DRAWING (composer only)
    // ========================================================================

    /// Ink one pixel. Coordinates outside `clip` or the canvas are ignored.
    #[inline]
    pub(crate) fn ink(&mut self, x: i32, y: i32, clip: &Rect) {
        if clip.contains(x, y) && self.bounds().contains(x, y) {
            self.image.put_pixel(x as u32, y as u32, Luma([BLACK]));
        }
    }

    /// Ink every pixel of `rect` that lies on the canvas.
    pub(crate) fn fill(&mut self, rect: &Rect) {
        let r = rect.intersection(&self.bounds());
        for y in r.y0..r.y1 {
            for x in r.x0..r.x1 {
                self.image.put_pixel(x as u32, y as u32, Luma([BLACK]));
            }
        }
    }

    /// Draw the cut/registration border: a frame `thickness` dots wide whose
    /// outer edge sits `margin` dots in from the canvas edge.
    pub(crate) fn draw_border(&mut self, margin: u32, thickness: u32) {
        let outer = self.bounds().inset(margin as i32, margin as i32);
        if outer.is_empty() || thickness == 0 {
            return;
        }
        let t = (thickness as i32).min(outer.width()).min(outer.height());
        let sides = [
            Rect::new(outer.x0, outer.y0, outer.x1, outer.y0 + t),
            Rect::new(outer.x0, outer.y1 - t, outer.x1, outer.y1),
            Rect::new(outer.x0, outer.y0, outer.x0 + t, outer.y1),
            Rect::new(outer.x1 - t, outer.y0, outer.x1, outer.y1),
        ];
        for side in &sides {
            self.fill(side);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = LabelCanvas::new(40, 20);
        assert_eq!((canvas.width(), canvas.height()), (40, 20));
        assert!(canvas.as_raw().iter().all(|&p| p == WHITE));
        assert_eq!(canvas.ink_bounds(), None);
    }

    #[test]
    fn test_border_ring() {
        let mut canvas = LabelCanvas::new(100, 60);
        canvas.draw_border(4, 6);

        // Outside the margin stays white.
        assert!(!canvas.is_black(3, 30));
        assert!(!canvas.is_black(50, 3));
        // The ring itself is inked.
        assert!(canvas.is_black(4, 30));
        assert!(canvas.is_black(9, 30));
        assert!(canvas.is_black(50, 55));
        // Inside the ring is the printable area.
        assert!(!canvas.is_black(10, 30));
        assert_eq!(canvas.ink_in(&Rect::new(10, 10, 90, 50)), 0);
        assert_eq!(canvas.ink_bounds(), Some(Rect::new(4, 4, 96, 56)));
    }

    #[test]
    fn test_border_on_tiny_canvas() {
        let mut canvas = LabelCanvas::new(12, 12);
        canvas.draw_border(4, 6);
        assert_eq!(canvas.ink_bounds(), Some(Rect::new(4, 4, 8, 8)));

        let mut canvas = LabelCanvas::new(6, 6);
        canvas.draw_border(4, 6);
        assert_eq!(canvas.ink_bounds(), None);
    }

    #[test]
    fn test_ink_respects_clip() {
        let mut canvas = LabelCanvas::new(10, 10);
        let clip = Rect::new(2, 2, 8, 8);
        canvas.ink(1, 1, &clip);
        canvas.ink(5, 5, &clip);
        canvas.ink(-1, 5, &Rect::new(-5, -5, 20, 20));
        canvas.ink(12, 5, &Rect::new(-5, -5, 20, 20));
        assert_eq!(canvas.ink_in(&canvas.bounds()), 1);
        assert!(canvas.is_black(5, 5));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let canvas = LabelCanvas::new(4, 4);
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.pixel(3, 3), Some(WHITE));
        assert!(!canvas.is_black(10, 10));
    }
}
