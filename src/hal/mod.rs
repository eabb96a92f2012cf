//! Hardware Abstraction Layer for the serial Wi-Fi bridge.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Command logic stays in core modules, HAL is just I/O.

pub mod uart;
pub mod wifi;

pub use uart::UartPort;
pub use wifi::EspWirelessControl;
