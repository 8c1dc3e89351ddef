//! Two-tone reduction for background pictures, and row packing for printer
//! rasters.
//!
//! Backgrounds are reduced with a Bayer 8×8 ordered dither: each dot compares
//! its darkness against the matrix level at `(x mod 8, y mod 8)`. Mid grays
//! become an even dot pattern instead of a solid block, and the result is
//! stable from render to render.
//!
//! ```text
//! luma 255 ░░░░░░░░  no dots
//! luma 192 ░▒░░░▒░░  1 in 4
//! luma 128 ▒░▒░▒░▒░  1 in 2
//! luma   0 ████████  every dot
//! ```
//!
//! ```
//! use etiqueta::render::dither::pack_row;
//!
//! assert_eq!(pack_row(&[true, true, false, false, true, false, true, false]), vec![0b1100_1010]);
//! ```

use image::{GrayImage, Luma};

use super::canvas::{BLACK, WHITE};

/// Bayer 8×8 levels, each of 0..64 exactly once.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Whether the dot at `(x, y)` with gray value `luma` (0 = black) prints.
///
/// Darkness `d = 255 - luma` prints when `d / 255 > (level + ½) / 64`,
/// evaluated in integers. Pure black always prints and pure white never does.
#[inline]
pub fn prints(x: u32, y: u32, luma: u8) -> bool {
    let level = BAYER8[(y & 7) as usize][(x & 7) as usize] as u32;
    let darkness = 255 - luma as u32;
    darkness * 128 > (2 * level + 1) * 255
}

/// Dither a grayscale image to pure [`BLACK`] / [`WHITE`].
pub fn dither_gray(image: &GrayImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if prints(x, y, image.get_pixel(x, y).0[0]) {
            Luma([BLACK])
        } else {
            Luma([WHITE])
        }
    })
}

/// Pack one row of dots (true = black) into bytes, leftmost dot in the MSB.
///
/// A trailing partial byte is padded with white (zero) bits.
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];
    for (i, _) in pixels.iter().enumerate().filter(|(_, black)| **black) {
        bytes[i / 8] |= 0x80 >> (i % 8);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ink(image: &GrayImage) -> usize {
        image.pixels().filter(|p| p.0[0] == BLACK).count()
    }

    #[test]
    fn test_matrix_is_a_permutation() {
        let mut levels: Vec<u8> = BAYER8.iter().flatten().copied().collect();
        levels.sort_unstable();
        assert_eq!(levels, (0..64).collect::<Vec<u8>>());
    }

    #[test]
    fn test_pattern_repeats_every_eight_dots() {
        for y in 0..8 {
            for x in 0..8 {
                for luma in [40, 128, 200] {
                    assert_eq!(prints(x, y, luma), prints(x + 8, y, luma));
                    assert_eq!(prints(x, y, luma), prints(x, y + 16, luma));
                }
            }
        }
    }

    #[test]
    fn test_solid_black_and_white_survive() {
        let black = GrayImage::from_pixel(16, 16, Luma([0]));
        let white = GrayImage::from_pixel(16, 16, Luma([255]));
        assert_eq!(ink(&dither_gray(&black)), 256);
        assert_eq!(ink(&dither_gray(&white)), 0);
    }

    #[test]
    fn test_gray_levels_scale_ink() {
        let dots = |luma: u8| ink(&dither_gray(&GrayImage::from_pixel(8, 8, Luma([luma]))));
        assert_eq!(dots(128), 32);
        assert!(dots(64) > dots(128));
        assert!(dots(192) < dots(128));

        let dithered = dither_gray(&GrayImage::from_pixel(8, 8, Luma([100])));
        assert!(dithered.pixels().all(|p| p.0[0] == BLACK || p.0[0] == WHITE));
    }

    #[test]
    fn test_pack_row() {
        assert_eq!(pack_row(&[true; 8]), vec![0xFF]);
        assert_eq!(pack_row(&[false, true, false, true, false, true, false, true]), vec![0x55]);
        assert_eq!(pack_row(&[true; 9]), vec![0xFF, 0x80]);
        assert_eq!(pack_row(&[false, false, true]), vec![0x20]);
        assert!(pack_row(&[]).is_empty());
    }
}
