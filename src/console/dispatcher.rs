//! Command dispatcher
//!
//! Maps a parsed [`Command`] onto the wireless facade and writes the
//! response lines. Every failure comes back as a [`CommandError`]; nothing
//! here terminates the command loop.

use core::fmt::Write;

use log::{error, info, warn};

use super::parser::Command;
use super::CommandError;
use crate::wireless::{AssociationCell, Rejected, ScanResultSet, WirelessControl};

/// Completion marker written after the last access point line.
pub const SCAN_COMPLETE: &str = "Wi-Fi scan completed.";

impl From<Rejected> for CommandError {
    fn from(r: Rejected) -> Self {
        match r {
            Rejected::Busy => Self::Busy,
            Rejected::NotReady => Self::NotReady,
            Rejected::AlreadyConnected => Self::AlreadyConnected,
        }
    }
}

/// Drives the facade from parsed commands
pub struct Dispatcher<'a, W> {
    wifi: W,
    state: &'a AssociationCell,
}

impl<'a, W: WirelessControl> Dispatcher<'a, W> {
    pub fn new(wifi: W, state: &'a AssociationCell) -> Self {
        Self { wifi, state }
    }

    pub fn wifi(&self) -> &W {
        &self.wifi
    }

    /// Execute a parsed command
    pub fn execute(&mut self, cmd: &Command<'_>, out: &mut dyn Write) -> Result<(), CommandError> {
        match cmd {
            Command::Scan => self.cmd_scan(out),
            Command::Connect { ssid, credential } => self.cmd_connect(ssid, credential, out),
            Command::Status => self.cmd_status(out),
            Command::Unknown { raw } => {
                warn!("unknown command: {}", raw);
                Err(CommandError::UnknownCommand)
            }
        }
    }

    // --- Command Implementations ---

    fn cmd_scan(&mut self, out: &mut dyn Write) -> Result<(), CommandError> {
        self.state.begin_scan().inspect_err(|r| warn!("scan rejected: {:?}", r))?;

        info!("starting Wi-Fi scan");
        let result = self.wifi.scan();
        let after = self.state.finish_scan();

        match result {
            Ok(aps) => {
                info!("scan found {} access points, now {}", aps.total, after);
                write_scan_results(&aps, out);
                Ok(())
            }
            Err(e) => {
                error!("scan failed: {}", e);
                Err(e.into())
            }
        }
    }

    fn cmd_connect(
        &mut self,
        ssid: &str,
        credential: &str,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        self.state.begin_connect().inspect_err(|r| warn!("connect rejected: {:?}", r))?;

        info!("connecting to SSID: {}", ssid);
        if let Err(e) = self.wifi.connect(ssid, credential) {
            self.state.abort_connect();
            error!("connect to {} failed: {}", ssid, e);
            return Err(e.into());
        }

        let _ = writeln!(out, "connecting to {}", ssid);
        Ok(())
    }

    fn cmd_status(&self, out: &mut dyn Write) -> Result<(), CommandError> {
        let _ = writeln!(out, "{}", self.state.state());
        Ok(())
    }
}

/// Format a scan result set, one line per access point
///
/// An empty set writes the completion marker alone.
pub fn write_scan_results(aps: &ScanResultSet, out: &mut dyn Write) {
    if !aps.is_empty() {
        let _ = writeln!(out, "Found {} access points:", aps.total);
    }
    for ap in &aps.records {
        let _ = writeln!(out, "SSID: {}, RSSI: {}, Channel: {}", ap.ssid, ap.rssi, ap.channel);
    }
    if aps.records.len() < aps.total {
        let _ = writeln!(out, "({} not shown)", aps.total - aps.records.len());
    }
    let _ = writeln!(out, "{}", SCAN_COMPLETE);
}
