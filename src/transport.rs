//! Serial transport.
//!
//! Byte-oriented, line-oriented text in both directions, no framing.
//! The command loop only needs a bounded-wait read and a blocking write.

use core::fmt;

/// Transport failure. The command loop logs it and retries on the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Read failed with a driver error code.
    Read { code: i32 },
    /// Write failed with a driver error code.
    Write { code: i32 },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { code } => write!(f, "serial read error {}", code),
            Self::Write { code } => write!(f, "serial write error {}", code),
        }
    }
}

/// Bidirectional serial channel.
pub trait SerialPort {
    /// Wait up to `timeout_ms` for input.
    ///
    /// Returns the number of bytes placed in `buf`; `Ok(0)` means the wait
    /// timed out with nothing received.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, TransportError>;

    /// Write every byte of `bytes`.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

/// `core::fmt::Write` adapter over a [`SerialPort`].
///
/// Expands `\n` to `\r\n` for serial terminals.
pub struct PortWriter<'p, P: ?Sized> {
    port: &'p mut P,
}

impl<'p, P: SerialPort + ?Sized> PortWriter<'p, P> {
    pub fn new(port: &'p mut P) -> Self {
        Self { port }
    }
}

impl<P: SerialPort + ?Sized> fmt::Write for PortWriter<'_, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut parts = s.split('\n');
        if let Some(first) = parts.next() {
            self.port.write_all(first.as_bytes()).map_err(|_| fmt::Error)?;
        }
        for part in parts {
            self.port.write_all(b"\r\n").map_err(|_| fmt::Error)?;
            self.port.write_all(part.as_bytes()).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
