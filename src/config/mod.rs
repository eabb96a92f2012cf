//! Module: config
//!
//! Purpose: Build-time limits and runtime settings for the bridge.
//!
//! Limits are constants because every buffer is statically sized.
//! Runtime settings live in [`BridgeConfig`] and are fixed at startup.

/// Line buffer capacity in bytes.
pub const LINE_CAPACITY: usize = 1024;

/// Bytes requested from the transport per read.
///
/// One less than the line capacity so a chunk-framed read always fits.
pub const READ_CHUNK: usize = LINE_CAPACITY - 1;

/// Maximum SSID length (802.11).
pub const SSID_MAX: usize = 32;

/// Maximum credential length (WPA passphrase or 64 hex PSK).
pub const CREDENTIAL_MAX: usize = 64;

/// Access point records kept per scan.
pub const MAX_SCAN_RECORDS: usize = 32;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// How incoming bytes are split into command lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// A line ends at CR or LF.
    Delimited,
    /// Every non-empty read is one command line.
    Chunk,
}

/// Serial bridge settings.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// UART baud rate (8N1, no flow control).
    pub baud_rate: u32,
    /// Bounded wait per transport read.
    pub read_timeout_ms: u32,
    pub framing: Framing,
    /// Echo typed characters back (interactive terminals).
    pub echo: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            read_timeout_ms: 1000,
            framing: Framing::Delimited,
            echo: false,
        }
    }
}
