//! # Serial Wi-Fi Bridge
//!
//! UART command console driving the ESP32 Wi-Fi station.
//!
//! ## Architecture
//!
//! ```text
//! UART ──▶ SerialReader ──▶ parse_line ──▶ Dispatcher ──▶ WirelessControl
//!   ▲                                          │                 │
//!   └──────────── response lines ◀─────────────┘                 │
//!                                                                 ▼
//!                     AssociationCell ◀──── WirelessEvent (event loop task)
//! ```
//!
//! - Commands run strictly in arrival order on the reader thread
//! - Scan blocks the reader; connect only starts association
//! - Association outcome arrives from the system event loop
//! - Shared state is one atomic word, no locks

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod transport;
pub mod wireless;

#[cfg(target_os = "espidf")]
pub mod hal;

pub use config::BridgeConfig;
pub use console::{Command, CommandError, Dispatcher, SerialReader};
pub use transport::{SerialPort, TransportError};
pub use wireless::{
    subscribe_notifications, AssociationCell, AssociationState, WirelessControl, WirelessError,
    WirelessEvent,
};
