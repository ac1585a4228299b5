//! Tick countdown with distinct disarmed and expired states.
//!
//! A bare counter cannot tell "not running" from "just hit zero". Keeping the
//! two apart lets the state machines re-arm on expiry without ever treating an
//! idle timer as a fired one.

/// A countdown measured in UI ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Countdown {
    /// Not running.
    #[default]
    Disarmed,
    /// Running with this many ticks left. Always non-zero.
    Running(u32),
    /// Reached zero. Stays expired until re-armed or disarmed.
    Expired,
}

impl Countdown {
    /// Start counting down `ticks`. Arming with zero expires immediately.
    #[must_use]
    pub const fn armed(ticks: u32) -> Self {
        if ticks == 0 {
            Countdown::Expired
        } else {
            Countdown::Running(ticks)
        }
    }

    /// Re-arm in place.
    pub fn arm(&mut self, ticks: u32) {
        *self = Self::armed(ticks);
    }

    /// Stop the countdown.
    pub fn disarm(&mut self) {
        *self = Countdown::Disarmed;
    }

    /// Advance by one tick.
    pub fn tick(&mut self) {
        if let Countdown::Running(left) = *self {
            *self = match left {
                0 | 1 => Countdown::Expired,
                n => Countdown::Running(n.saturating_sub(1)),
            };
        }
    }

    /// `true` once the countdown has reached zero.
    pub const fn is_expired(self) -> bool {
        matches!(self, Countdown::Expired)
    }

    /// `true` while ticks remain.
    pub const fn is_running(self) -> bool {
        matches!(self, Countdown::Running(_))
    }

    /// Ticks left, `None` when disarmed or expired.
    pub const fn remaining(self) -> Option<u32> {
        match self {
            Countdown::Running(left) => Some(left),
            _ => None,
        }
    }
}
