//! # Text Module
//!
//! Font faces, measurement, word wrapping and the font-fit search.
//!
//! ```text
//! FontFace ──► TextMetrics ──► wrap ──► fit ──► FitResult
//!    │                                              │
//!    └──────────────── draw_line ◄──────────────────┘  (render::text)
//! ```

pub mod fit;
pub mod font;
pub mod metrics;
pub mod wrap;

pub use fit::{FitResult, LINE_SPACING, MAX_FONT_SIZE, fit, layout};
pub use font::FontFace;
pub use metrics::{MeasureCache, TextExtent, TextMetrics};
pub use wrap::wrap;
