//! Console error types

use crate::wireless::WirelessError;

/// Per-command failure, reported on the serial channel as `ERR <code>: <message>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Missing, extra or malformed arguments
    InvalidArguments,
    /// E03: SSID or credential exceeds its bound
    ArgumentTooLong,
    /// E04: A scan or connect is already in flight
    Busy,
    /// E05: Wireless subsystem not initialized
    NotReady,
    /// E06: Connect requested while associated
    AlreadyConnected,
    /// E07: Facade reported a failure
    Wireless(WirelessError),
    /// E08: Input exceeded the line buffer
    LineOverflow,
}

impl CommandError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidArguments => "E02",
            Self::ArgumentTooLong => "E03",
            Self::Busy => "E04",
            Self::NotReady => "E05",
            Self::AlreadyConnected => "E06",
            Self::Wireless(_) => "E07",
            Self::LineOverflow => "E08",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::InvalidArguments => "invalid arguments",
            Self::ArgumentTooLong => "argument too long",
            Self::Busy => "busy",
            Self::NotReady => "not ready",
            Self::AlreadyConnected => "already connected",
            Self::Wireless(_) => "wireless error",
            Self::LineOverflow => "line too long",
        }
    }
}

impl From<WirelessError> for CommandError {
    fn from(e: WirelessError) -> Self {
        Self::Wireless(e)
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Wireless(e) => write!(f, "{}: {} ({})", self.code(), self.message(), e),
            _ => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}
