//! Text measurement.
//!
//! Everything above the font layer (wrapping, fit search) only needs to know
//! how big a string is at a given size. That question is the [`TextMetrics`]
//! trait; [`FontFace`](super::FontFace) answers it for real fonts and tests
//! answer it with simple fixed-advance fakes.

use std::cell::RefCell;
use std::collections::HashMap;

/// Layout box of a single line of text.
///
/// The box is the advance width times the font's line height, not the tight
/// ink bounds, so it grows monotonically with the font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
    /// Distance from the top of the box to the baseline.
    pub baseline: u32,
}

/// Measures single-line strings.
///
/// Implementations must be deterministic for a given (face, text, size) and
/// non-decreasing in `size` for both width and height.
pub trait TextMetrics {
    fn measure(&self, text: &str, size: u32) -> TextExtent;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, size: u32) -> TextExtent {
        (**self).measure(text, size)
    }
}

/// Memoises another [`TextMetrics`] for the duration of one render.
///
/// The fit search re-measures the same words at many sizes; a cache per
/// render keeps that cheap without sharing state between renders.
pub struct MeasureCache<M> {
    inner: M,
    cache: RefCell<HashMap<(String, u32), TextExtent>>,
}

impl<M: TextMetrics> MeasureCache<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct (text, size) pairs measured so far.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: TextMetrics> TextMetrics for MeasureCache<M> {
    fn measure(&self, text: &str, size: u32) -> TextExtent {
        let key = (text.to_string(), size);
        if let Some(extent) = self.cache.borrow().get(&key) {
            return *extent;
        }
        let extent = self.inner.measure(text, size);
        self.cache.borrow_mut().insert(key, extent);
        extent
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Fixed-advance metrics: every char is `size / 2` wide and `size` tall.
    pub struct Monospace;

    impl TextMetrics for Monospace {
        fn measure(&self, text: &str, size: u32) -> TextExtent {
            TextExtent {
                width: text.chars().count() as u32 * size.div_ceil(2),
                height: size,
                baseline: size,
            }
        }
    }

    /// Bundled DejaVu Sans Bold, used to exercise the TrueType path.
    pub const TEST_FONT: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSans-Bold.ttf");

    pub fn truetype() -> crate::text::FontFace {
        crate::text::FontFace::load(TEST_FONT).unwrap()
    }
}
