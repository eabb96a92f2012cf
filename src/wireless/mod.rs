//! Wireless control facade.
//!
//! The radio is an opaque service. The core only sees a blocking scan, a
//! fire-and-forget connect, and association notifications delivered from
//! another execution context.

pub mod state;

pub use state::{AssociationCell, AssociationState, Rejected};

use heapless::{String, Vec};

use crate::config::{MAX_SCAN_RECORDS, SSID_MAX};

/// Wireless operation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WirelessError {
    /// Driver returned an error code (`esp_err_t` on ESP-IDF).
    Driver { code: i32 },
    /// Driver refused the station configuration.
    InvalidConfig,
    /// Notification handler was already registered.
    AlreadySubscribed,
}

impl core::fmt::Display for WirelessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Driver { code } => write!(f, "driver error {}", code),
            Self::InvalidConfig => f.write_str("invalid configuration"),
            Self::AlreadySubscribed => f.write_str("already subscribed"),
        }
    }
}

/// Asynchronous association outcome reported by the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WirelessEvent {
    /// Association completed.
    Connected,
    /// An established link dropped.
    Disconnected,
    /// Association attempt ended without a link.
    ConnectFailed,
}

/// Turns raw station link up/down reports into [`WirelessEvent`]s.
///
/// A link-down before any link-up ends the attempt as
/// [`WirelessEvent::ConnectFailed`]; after an association it is a
/// [`WirelessEvent::Disconnected`].
#[derive(Debug, Default)]
pub struct LinkClassifier {
    associated: bool,
}

impl LinkClassifier {
    pub const fn new() -> Self {
        Self { associated: false }
    }

    pub fn link_up(&mut self) -> WirelessEvent {
        self.associated = true;
        WirelessEvent::Connected
    }

    pub fn link_down(&mut self) -> WirelessEvent {
        if core::mem::take(&mut self.associated) {
            WirelessEvent::Disconnected
        } else {
            WirelessEvent::ConnectFailed
        }
    }
}

/// One discovered access point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPointRecord {
    pub ssid: String<SSID_MAX>,
    /// Signal strength in dBm.
    pub rssi: i8,
    /// Primary channel.
    pub channel: u8,
}

/// Result of a single scan, in driver order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResultSet {
    pub records: Vec<AccessPointRecord, MAX_SCAN_RECORDS>,
    /// Access points the driver reported, including ones not kept in `records`.
    pub total: usize,
}

impl ScanResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, counting it even when the record list is full.
    pub fn push(&mut self, record: AccessPointRecord) {
        self.total += 1;
        let _ = self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Radio operations the dispatcher drives.
pub trait WirelessControl {
    /// Keeps the notification handler registered while alive.
    type Subscription;

    /// Scan all channels, hidden networks included. Blocks until done.
    fn scan(&mut self) -> Result<ScanResultSet, WirelessError>;

    /// Apply the station configuration and start association.
    ///
    /// Returns once the request is issued; the outcome arrives as a
    /// [`WirelessEvent`].
    fn connect(&mut self, ssid: &str, credential: &str) -> Result<(), WirelessError>;

    /// Register the association notification handler.
    fn subscribe<F>(&mut self, handler: F) -> Result<Self::Subscription, WirelessError>
    where
        F: FnMut(WirelessEvent) + Send + 'static;
}

/// Route facade notifications into the association state.
///
/// Succeeds once per cell; later calls return
/// [`WirelessError::AlreadySubscribed`].
pub fn subscribe_notifications<W: WirelessControl>(
    wifi: &mut W,
    cell: &'static AssociationCell,
) -> Result<W::Subscription, WirelessError> {
    if !cell.claim_subscription() {
        return Err(WirelessError::AlreadySubscribed);
    }
    wifi.subscribe(move |event| {
        cell.apply(event);
    })
    .inspect_err(|_| cell.release_subscription())
}
