//! # Printer Protocols
//!
//! Turns a finished [`LabelCanvas`](crate::render::LabelCanvas) into bytes a
//! printer understands.
//!
//! ## Module Structure
//!
//! - [`tspl`]: TSPL label jobs (`SIZE`, `GAP`, `BITMAP`, `PRINT`, ...)
//!
//! ## Usage Example
//!
//! ```
//! use etiqueta::printer::PrinterConfig;
//! use etiqueta::protocol::tspl::{self, TsplConfig};
//! use etiqueta::render::LabelCanvas;
//!
//! let printer = PrinterConfig::RW402B;
//! let (w, h) = printer.canvas_size();
//! let job = tspl::encode(&LabelCanvas::new(w, h), &printer, &TsplConfig::default(), 1);
//! assert!(job.starts_with(b"SIZE 57.15 mm,31.75 mm\r\n"));
//! ```

pub mod tspl;
