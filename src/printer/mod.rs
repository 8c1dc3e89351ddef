//! # Printer Module
//!
//! Printer and label profiles.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware and label specifications

pub mod config;

pub use config::PrinterConfig;
