//! # Rendering Module
//!
//! Raster side of label composition.
//!
//! ## Modules
//!
//! - [`canvas`]: the monochrome [`LabelCanvas`] and the cut border
//! - [`text`]: the rotated text renderer (off-screen block, mask stamp)
//! - [`background`]: background image crop, dither and paste
//! - [`dither`]: Bayer 8x8 ordered dithering and row packing

pub mod background;
pub mod canvas;
pub mod dither;
pub mod text;

pub use canvas::LabelCanvas;
