//! Association state shared by the dispatcher and the radio event handler.
//!
//! The lifecycle state and a link-up flag are packed into one atomic byte.
//! Every transition is a compare-and-swap over that byte, so a reader never
//! sees a half-applied transition and two contexts can't both win the
//! in-flight slot.
//!
//! ```text
//! Uninitialized ──▶ Idle ──▶ Scanning ──▶ Idle / Connected
//!                    │  ▲
//!                    ▼  │ Disconnected / ConnectFailed
//!                Connecting ──▶ Connected
//! ```

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use log::{debug, info};

use super::WirelessEvent;

/// Link-up flag, kept across a scan started while associated.
const LINK_UP: u8 = 0x80;
const STATE_MASK: u8 = 0x07;

/// Wireless interface lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AssociationState {
    Uninitialized = 0,
    Idle = 1,
    Scanning = 2,
    Connecting = 3,
    Connected = 4,
}

impl AssociationState {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Idle,
            2 => Self::Scanning,
            3 => Self::Connecting,
            4 => Self::Connected,
            _ => Self::Uninitialized,
        }
    }

    /// Name reported by `status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

impl core::fmt::Display for AssociationState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a scan or connect request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejected {
    /// Another scan or connect is in flight.
    Busy,
    /// Wireless subsystem not brought up yet.
    NotReady,
    /// Connect requested while associated.
    AlreadyConnected,
}

impl Rejected {
    fn for_state(state: AssociationState) -> Self {
        match state {
            AssociationState::Uninitialized => Self::NotReady,
            AssociationState::Connected => Self::AlreadyConnected,
            _ => Self::Busy,
        }
    }
}

/// Process-wide association state holder.
///
/// # Usage
///
/// ```ignore
/// static ASSOCIATION: AssociationCell = AssociationCell::new();
///
/// // After driver bring-up:
/// ASSOCIATION.mark_ready();
///
/// // Command loop:
/// ASSOCIATION.begin_connect()?;
///
/// // Radio event context:
/// ASSOCIATION.apply(WirelessEvent::Connected);
/// ```
pub struct AssociationCell {
    word: AtomicU8,
    subscribed: AtomicBool,
}

impl AssociationCell {
    /// Create a new holder in `Uninitialized`.
    pub const fn new() -> Self {
        Self {
            word: AtomicU8::new(AssociationState::Uninitialized as u8),
            subscribed: AtomicBool::new(false),
        }
    }

    /// Current state. Never blocks.
    #[inline]
    pub fn state(&self) -> AssociationState {
        decode(self.word.load(Ordering::Acquire)).0
    }

    /// Whether the radio currently holds an association.
    #[inline]
    pub fn link_up(&self) -> bool {
        decode(self.word.load(Ordering::Acquire)).1
    }

    /// `Uninitialized → Idle`, once the wireless subsystem is started.
    pub fn mark_ready(&self) -> bool {
        self.transition(|state, _| match state {
            AssociationState::Uninitialized => Some((AssociationState::Idle, false)),
            _ => None,
        })
        .is_ok()
    }

    /// Take the in-flight slot for a scan.
    pub fn begin_scan(&self) -> Result<(), Rejected> {
        self.transition(|state, link| match state {
            AssociationState::Idle | AssociationState::Connected => {
                Some((AssociationState::Scanning, link))
            }
            _ => None,
        })
        .map(|_| ())
        .map_err(Rejected::for_state)
    }

    /// Release the scan slot. Returns the state the scan leaves behind.
    pub fn finish_scan(&self) -> AssociationState {
        let after = self.transition(|state, link| match state {
            AssociationState::Scanning if link => Some((AssociationState::Connected, true)),
            AssociationState::Scanning => Some((AssociationState::Idle, false)),
            _ => None,
        });
        after.unwrap_or_else(|current| current)
    }

    /// Take the in-flight slot for a connect. Only allowed from `Idle`.
    pub fn begin_connect(&self) -> Result<(), Rejected> {
        self.transition(|state, _| match state {
            AssociationState::Idle => Some((AssociationState::Connecting, false)),
            _ => None,
        })
        .map(|_| ())
        .map_err(Rejected::for_state)
    }

    /// Connect request never reached the radio; give the slot back.
    pub fn abort_connect(&self) {
        let _ = self.transition(|state, _| match state {
            AssociationState::Connecting => Some((AssociationState::Idle, false)),
            _ => None,
        });
    }

    /// Apply a radio notification. Returns the resulting state.
    ///
    /// Notifications that don't match the current state are ignored.
    pub fn apply(&self, event: WirelessEvent) -> AssociationState {
        let result = self.transition(|state, link| match (event, state) {
            (WirelessEvent::Connected, AssociationState::Connecting) => {
                Some((AssociationState::Connected, true))
            }
            (WirelessEvent::Connected, _) => None,
            (_, AssociationState::Connecting | AssociationState::Connected) => {
                Some((AssociationState::Idle, false))
            }
            // Link dropped mid-scan: the scan ends in Idle.
            (_, AssociationState::Scanning) if link => Some((AssociationState::Scanning, false)),
            _ => None,
        });

        match result {
            Ok(state) => {
                info!("association: {:?} -> {}", event, state);
                state
            }
            Err(state) => {
                debug!("association: {:?} ignored in {}", event, state);
                state
            }
        }
    }

    /// Claim the single notification subscription slot.
    pub fn claim_subscription(&self) -> bool {
        self.subscribed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Undo [`claim_subscription`](Self::claim_subscription) after a failed registration.
    pub fn release_subscription(&self) {
        self.subscribed.store(false, Ordering::Release);
    }

    /// CAS loop over the packed word. `Ok` carries the new state, `Err` the
    /// unchanged current one.
    fn transition<F>(&self, mut f: F) -> Result<AssociationState, AssociationState>
    where
        F: FnMut(AssociationState, bool) -> Option<(AssociationState, bool)>,
    {
        self.word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                let (state, link) = decode(word);
                f(state, link).map(|(next, link)| encode(next, link))
            })
            .map(|prev| {
                let (state, link) = decode(prev);
                // Re-run on the winning value to report the stored state.
                f(state, link).map(|(next, _)| next).unwrap_or(state)
            })
            .map_err(|word| decode(word).0)
    }
}

impl Default for AssociationCell {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn decode(word: u8) -> (AssociationState, bool) {
    (AssociationState::from_u8(word & STATE_MASK), word & LINK_UP != 0)
}

#[inline]
fn encode(state: AssociationState, link: bool) -> u8 {
    state as u8 | if link { LINK_UP } else { 0 }
}
