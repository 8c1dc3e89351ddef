//! # Font-Fit Search
//!
//! Finds the largest font size at which a (possibly wrapped) string fits a
//! width × height box.
//!
//! ## Why a Binary Search Works
//!
//! Growing the font size never makes a word narrower or a line shorter, so
//! the wrapped block's height and widest line are both non-decreasing in the
//! size. The feasible sizes therefore form a prefix `[min_size, K]` and the
//! search bisects for `K`:
//!
//! ```text
//! size:     10  11  12 ... K   K+1 ... max
//! fits:     ✓   ✓   ✓  ... ✓   ✗   ... ✗
//!                          ▲
//!                      font_size
//! ```
//!
//! If even `min_size` overflows, the layout at `min_size` is returned anyway.

use super::metrics::TextMetrics;
use super::wrap::wrap;

/// Vertical gap between wrapped lines, in dots.
pub const LINE_SPACING: u32 = 2;

/// Largest font size the search ever tries, whatever the caller asks for.
pub const MAX_FONT_SIZE: u32 = 500;

/// A font size together with the wrapped lines it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitResult {
    pub font_size: u32,
    pub lines: Vec<String>,
    /// Sum of line heights plus spacing between lines.
    pub total_height: u32,
    /// Width of the widest line.
    pub max_line_width: u32,
}

impl FitResult {
    /// Result for inputs with nothing to lay out.
    pub fn empty(font_size: u32) -> Self {
        Self {
            font_size,
            lines: vec![String::new()],
            total_height: 0,
            max_line_width: 0,
        }
    }

    /// True when the block fits a `max_width × max_height` box.
    pub fn fits_within(&self, max_width: i32, max_height: i32) -> bool {
        max_width >= 0
            && max_height >= 0
            && self.max_line_width <= max_width as u32
            && self.total_height <= max_height as u32
    }

    /// True when there is nothing to draw.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }
}

/// Wrap `text` at `size` and measure the resulting block.
pub fn layout<M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    size: u32,
    max_width: u32,
) -> FitResult {
    let lines = wrap(metrics, text, size, max_width);
    let mut total_height = 0u32;
    let mut max_line_width = 0u32;

    for (i, line) in lines.iter().enumerate() {
        let extent = metrics.measure(line, size);
        if i > 0 {
            total_height = total_height.saturating_add(LINE_SPACING);
        }
        total_height = total_height.saturating_add(extent.height);
        max_line_width = max_line_width.max(extent.width);
    }

    FitResult {
        font_size: size,
        lines,
        total_height,
        max_line_width,
    }
}

/// Largest size in `[min_size, max_size]` whose wrapped layout fits
/// `max_width × max_height`, or the `min_size` layout if none does.
///
/// Empty text or a non-positive `max_width` yields [`FitResult::empty`] at
/// `min_size`. Both bounds are clamped to `1..=`[`MAX_FONT_SIZE`], and a
/// `max_size` below `min_size` is treated as `min_size`. Settings files with
/// out-of-range bounds are rejected before they get here
/// ([`Settings::validate`](crate::config::Settings::validate)).
pub fn fit<M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    max_width: i32,
    max_height: i32,
    min_size: u32,
    max_size: u32,
) -> FitResult {
    let min_size = min_size.clamp(1, MAX_FONT_SIZE);
    let max_size = max_size.clamp(min_size, MAX_FONT_SIZE);

    if text.trim().is_empty() || max_width <= 0 {
        return FitResult::empty(min_size);
    }
    let wrap_width = max_width as u32;

    let fits = |size: u32| {
        layout(metrics, text, size, wrap_width).fits_within(max_width, max_height)
    };

    if !fits(min_size) {
        return layout(metrics, text, min_size, wrap_width);
    }

    let (mut lo, mut hi) = (min_size, max_size);
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    layout(metrics, text, lo, wrap_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FontFace;
    use crate::text::metrics::testing::{Monospace, truetype};
    use pretty_assertions::assert_eq;

    /// Scan every size upward and keep the last one that fits.
    fn linear_fit<M: TextMetrics>(m: &M, text: &str, w: i32, h: i32, min: u32, max: u32) -> u32 {
        let mut best = min;
        for size in min..=max {
            if layout(m, text, size, w as u32).fits_within(w, h) {
                best = size;
            } else {
                break;
            }
        }
        best
    }

    #[test]
    fn test_single_word_limited_by_height() {
        // "Hi": 2 chars × ceil(s/2) ≤ 100 → s ≤ 100; height s ≤ 60.
        let result = fit(&Monospace, "Hi", 100, 60, 10, 500);
        assert_eq!(result.font_size, 60);
        assert_eq!(result.lines, vec!["Hi"]);
        assert_eq!(result.total_height, 60);
        assert_eq!(result.max_line_width, 60);
    }

    #[test]
    fn test_wrapping_allows_larger_size() {
        let result = fit(&Monospace, "happy birthday", 100, 100, 10, 500);
        assert_eq!(result.font_size, 24);
        assert_eq!(result.lines, vec!["happy", "birthday"]);
        assert_eq!(result.total_height, 24 * 2 + LINE_SPACING);
    }

    #[test]
    fn test_respects_max_size() {
        let result = fit(&Monospace, "x", 10_000, 10_000, 10, 72);
        assert_eq!(result.font_size, 72);
    }

    #[test]
    fn test_never_satisfied_returns_min() {
        let result = fit(&Monospace, "this will not fit", 30, 5, 10, 500);
        assert_eq!(result.font_size, 10);
        assert!(!result.fits_within(30, 5));
        assert!(!result.lines.is_empty());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(fit(&Monospace, "", 100, 100, 10, 500), FitResult::empty(10));
        assert_eq!(fit(&Monospace, "   ", 100, 100, 10, 500), FitResult::empty(10));
        assert_eq!(fit(&Monospace, "hello", 0, 100, 10, 500), FitResult::empty(10));
        assert_eq!(fit(&Monospace, "hello", -5, 100, 10, 500), FitResult::empty(10));
        assert!(FitResult::empty(10).is_blank());
    }

    #[test]
    fn test_bounds_are_capped() {
        let huge = fit(&Monospace, "x", i32::MAX, i32::MAX, 10, u32::MAX);
        assert_eq!(huge.font_size, MAX_FONT_SIZE);

        let both_huge = fit(&Monospace, "x", i32::MAX, i32::MAX, 4_000_000_000, u32::MAX);
        assert_eq!(both_huge.font_size, MAX_FONT_SIZE);

        let face = FontFace::builtin();
        let long = "Hello there ".repeat(50);
        let result = fit(&face, &long, i32::MAX, i32::MAX, 10, 4_000_000_000);
        assert!(result.font_size <= MAX_FONT_SIZE);
        assert!(result.fits_within(i32::MAX, i32::MAX));
    }

    #[test]
    fn test_inverted_bounds() {
        let result = fit(&Monospace, "hello", 1000, 1000, 40, 20);
        assert_eq!(result.font_size, 40);
    }

    #[test]
    fn test_matches_linear_scan() {
        let texts = [
            "Hi",
            "August 09, 2025",
            "Birthday",
            "Remember to water the plants every other Tuesday morning please",
        ];
        for face in [FontFace::builtin(), truetype()] {
            for text in texts {
                for (w, h) in [(430, 110), (430, 50), (100, 300), (60, 20), (900, 400)] {
                    let expected = linear_fit(&face, text, w, h, 10, 200);
                    let got = fit(&face, text, w, h, 10, 200);
                    assert_eq!(got.font_size, expected, "{:?}: {:?} in {}x{}", face, text, w, h);
                }
            }
        }
    }

    #[test]
    fn test_feasible_sizes_form_a_prefix() {
        let text = "Leftover chicken soup from Sunday dinner";
        for face in [FontFace::builtin(), truetype()] {
            for (w, h) in [(300, 120), (150, 200), (430, 56)] {
                let mut seen_failure = false;
                for size in 1..=160 {
                    let ok = layout(&face, text, size, w as u32).fits_within(w, h);
                    if seen_failure {
                        assert!(!ok, "{:?}: size {} fits after a smaller size failed", face, size);
                    }
                    seen_failure |= !ok;
                }
            }
        }
    }

    #[test]
    fn test_result_is_maximal() {
        let text = "Soup";
        for face in [FontFace::builtin(), truetype()] {
            let result = fit(&face, text, 200, 80, 10, 500);
            assert!(result.fits_within(200, 80));
            assert!(!layout(&face, text, result.font_size + 1, 200).fits_within(200, 80));
        }
    }

    #[test]
    fn test_long_message_wraps_to_many_lines() {
        let message =
            "Please remember to take the lasagna out of the freezer on Friday before heading to work";
        assert!(message.len() >= 85);
        let face = FontFace::builtin();

        let lines = wrap(&face, message, 40, 430);
        assert!(lines.len() >= 4, "{:?}", lines);
        for line in &lines {
            assert!(face.measure(line, 40).width <= 430);
        }

        // Already two lines (22 rows) at 10px.
        let result = fit(&face, message, 430, 12, 10, 500);
        assert_eq!(result.font_size, 10);
        assert!(!result.fits_within(430, 12));
    }
}
