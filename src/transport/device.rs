//! # Character-Device Transport
//!
//! Sends printer jobs to a device node: a Bluetooth RFCOMM serial port
//! (`/dev/rfcomm0`), a USB line printer (`/dev/usb/lp0`) or any file.
//!
//! ## Bluetooth Setup (Linux)
//!
//! ```bash
//! # Pair once, then bind the serial port profile to a device node
//! $ bluetoothctl pair DD:0D:30:32:20:B0
//! $ sudo rfcomm bind 0 DD:0D:30:32:20:B0
//! # This creates /dev/rfcomm0
//! ```
//!
//! ## TTY Configuration
//!
//! Terminals are switched to raw mode before the first write. BITMAP data is
//! arbitrary bytes: XON/XOFF (0x11, 0x13) and CR/LF translation would corrupt
//! it. Plain files and line-printer nodes are written as they are.
//!
//! ## Chunked Writes
//!
//! Jobs are written in chunks with a small delay between them so the
//! printer's receive buffer is not overrun.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EtiquetaError;

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Delivery settings for the CLI print loop and the device writer.
///
/// | Field | Default | Effect |
/// |-------|---------|--------|
/// | `device` | `/dev/rfcomm0` | Device node to write jobs to |
/// | `max_retries` | 3 | Attempts per label before giving up |
/// | `retry_wait_ms` | 2000 | Pause after a failed attempt |
/// | `pause_between_labels_ms` | 1000 | Pause between copies |
/// | `chunk_size` | 4096 | Bytes per write |
/// | `chunk_delay_ms` | 2 | Pause between chunks |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub device: PathBuf,
    pub max_retries: u32,
    pub retry_wait_ms: u64,
    pub pause_between_labels_ms: u64,
    pub chunk_size: usize,
    pub chunk_delay_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            max_retries: 3,
            retry_wait_ms: 2000,
            pause_between_labels_ms: 1000,
            chunk_size: 4096,
            chunk_delay_ms: 2,
        }
    }
}

/// # Device Transport
///
/// An open, write-only connection to a printer device node.
///
/// ## Example
///
/// ```no_run
/// use etiqueta::transport::DeviceTransport;
///
/// let mut transport = DeviceTransport::open("/dev/rfcomm0")?;
/// transport.write_all(b"SELFTEST\r\n")?;
///
/// # Ok::<(), etiqueta::error::EtiquetaError>(())
/// ```
pub struct DeviceTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open `device` for writing, switching terminals to raw mode.
    ///
    /// ## Errors
    ///
    /// [`EtiquetaError::Transport`] if the node does not exist, permission is
    /// denied (RFCOMM nodes usually need the `dialout` group), or the TTY
    /// cannot be configured.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, EtiquetaError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            EtiquetaError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let fd = file.as_raw_fd();
        if is_tty(fd) {
            configure_tty_raw(fd)?;
        }
        tracing::debug!(device = %path.display(), tty = is_tty(fd), "device opened");

        let defaults = TransportConfig::default();
        Ok(Self {
            file,
            chunk_size: defaults.chunk_size,
            chunk_delay: Duration::from_millis(defaults.chunk_delay_ms),
        })
    }

    /// Open the device named in `config` and apply its chunking settings.
    pub fn open_with(config: &TransportConfig) -> Result<Self, EtiquetaError> {
        let mut transport = Self::open(&config.device)?;
        transport.set_chunk_size(config.chunk_size);
        transport.set_chunk_delay(Duration::from_millis(config.chunk_delay_ms));
        Ok(transport)
    }

    /// Bytes per write. Zero is treated as one.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    /// Write a whole job, chunked, then flush.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), EtiquetaError> {
        let write_failed = |e: io::Error| EtiquetaError::Transport(format!("Write failed: {}", e));

        let chunks = data.len().div_ceil(self.chunk_size);
        for (i, chunk) in data.chunks(self.chunk_size).enumerate() {
            self.file.write_all(chunk).map_err(write_failed)?;
            if i + 1 < chunks && !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }

        self.file
            .flush()
            .map_err(|e| EtiquetaError::Transport(format!("Flush failed: {}", e)))?;
        tracing::debug!(bytes = data.len(), chunks, "job written");

        Ok(())
    }
}

fn is_tty(fd: i32) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Switch a terminal to raw mode with `cfmakeraw`: no input or output
/// processing, no flow control, no echo, 8-bit characters.
fn configure_tty_raw(fd: i32) -> Result<(), EtiquetaError> {
    let mut termios = std::mem::MaybeUninit::<libc::termios>::uninit();
    os_result("tcgetattr", unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) })?;
    let mut termios = unsafe { termios.assume_init() };

    unsafe { libc::cfmakeraw(&mut termios) };
    os_result("tcsetattr", unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) })
}

fn os_result(call: &str, rc: i32) -> Result<(), EtiquetaError> {
    if rc == 0 {
        Ok(())
    } else {
        Err(EtiquetaError::Transport(format!(
            "{} failed: {}",
            call,
            io::Error::last_os_error()
        )))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("etiqueta-{}-{}", std::process::id(), name));
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn test_default_device_path() {
        assert_eq!(TransportConfig::default().device, PathBuf::from("/dev/rfcomm0"));
    }

    #[test]
    fn test_open_missing_device() {
        let err = DeviceTransport::open("/nonexistent/rfcomm9").err().unwrap();
        assert!(matches!(err, EtiquetaError::Transport(_)));
    }

    #[test]
    fn test_chunked_write_reaches_file() {
        let path = scratch_file("chunked");
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let mut transport = DeviceTransport::open(&path).unwrap();
        transport.set_chunk_size(1000);
        transport.set_chunk_delay(Duration::ZERO);
        transport.write_all(&data).unwrap();
        drop(transport);

        assert_eq!(std::fs::read(&path).unwrap(), data);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_open_with_config() {
        let path = scratch_file("config");
        let config = TransportConfig {
            device: path.clone(),
            chunk_size: 0,
            chunk_delay_ms: 0,
            ..TransportConfig::default()
        };
        let mut transport = DeviceTransport::open_with(&config).unwrap();
        transport.write_all(b"PRINT 1\r\n").unwrap();
        drop(transport);

        assert_eq!(std::fs::read(&path).unwrap(), b"PRINT 1\r\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TransportConfig = toml::from_str("max_retries = 5\n").unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_wait_ms, 2000);
    }
}
