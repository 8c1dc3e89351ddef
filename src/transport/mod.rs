//! # Printer Transport Layer
//!
//! Communication backends for sending encoded jobs to printers.
//!
//! ## Available Transports
//!
//! - [`device`]: Character devices (Bluetooth RFCOMM, USB line printer), Linux

pub mod device;

pub use device::{DeviceTransport, TransportConfig};
