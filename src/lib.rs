//! # Etiqueta - Adaptive Label Composition
//!
//! Etiqueta renders short text and image content onto small fixed-size labels
//! for thermal label printers. It provides:
//!
//! - **Zone planning**: top/middle/bottom bands plus optional side columns
//! - **Font fitting**: the largest size at which wrapped text fits its zone
//! - **Rotation-aware rendering**: text at 0°, 90°, −90° and 180° so one label
//!   reads right way up from several directions
//! - **Printer output**: TSPL job encoding and a character-device transport
//!
//! ## Quick Start
//!
//! ```
//! use etiqueta::{ContentItem, LabelComposer, LabelContent, PrinterConfig};
//! use etiqueta::text::FontFace;
//!
//! let printer = PrinterConfig::RW402B;
//! let composer = LabelComposer::new(printer.layout(), FontFace::builtin());
//!
//! let content = LabelContent::new()
//!     .with(ContentItem::Date("August 09, 2025".into()))
//!     .with(ContentItem::Message("Leftover lasagna".into()));
//!
//! let label = composer.render(&content);
//! assert_eq!((label.canvas.width(), label.canvas.height()), (457, 254));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Zones, layout configuration and the zone planner |
//! | [`text`] | Fonts, measurement, word wrapping and font fitting |
//! | [`render`] | Canvas, rotated text renderer, background compositor |
//! | [`composer`] | The label composer that ties the stages together |
//! | [`printer`] | Printer and label profiles |
//! | [`protocol`] | TSPL job encoding |
//! | [`transport`] | Device transport |
//! | [`config`] | TOML settings file |
//! | [`error`] | Error and warning types |
//!
//! ## Supported Printers
//!
//! Currently tested with:
//! - RW402B (203 DPI, TSPL, Bluetooth serial) with 2.25" × 1.25" labels

pub mod composer;
pub mod config;
pub mod error;
pub mod layout;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod text;
pub mod transport;

// Re-exports for convenience
pub use composer::{ContentItem, Label, LabelComposer, LabelContent};
pub use config::Settings;
pub use error::{EngineWarning, EtiquetaError};
pub use layout::LayoutConfig;
pub use printer::PrinterConfig;
pub use render::LabelCanvas;
pub use transport::DeviceTransport;
