//! Keypad timing settings.
//!
//! The settings store itself (EEPROM / battery RAM) is an external
//! collaborator. The UI core only reads the two keypad timers through
//! [`SettingsStore`] and never writes anything back.

use thiserror_no_std::Error;

use crate::config::TIMER_UNIT_TICKS;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a setting is outside its valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── KeypadTimings ────────────────────────────────────────────────────────────

/// Long-press and auto-repeat intervals, in 100 ms setting units.
///
/// Both values are kept within `1..=20` (0.1 s – 2 s). Zero is rejected: a
/// zero long-press timer would fire on the same tick as the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeypadTimings {
    long: u8,
    repeat: u8,
}

impl KeypadTimings {
    /// Smallest accepted setting value.
    pub const MIN_UNITS: u8 = 1;
    /// Largest accepted setting value.
    pub const MAX_UNITS: u8 = 20;

    /// Factory defaults: 0.5 s long press, 0.3 s repeat.
    pub const DEFAULT: Self = Self { long: 5, repeat: 3 };

    /// Validate and build keypad timings.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] for the first value outside `1..=20`.
    pub fn try_new(long_units: u8, repeat_units: u8) -> Result<Self, OutOfRangeError> {
        Self::check(long_units)?;
        Self::check(repeat_units)?;
        Ok(Self {
            long: long_units,
            repeat: repeat_units,
        })
    }

    /// Build keypad timings, clamping both values into `1..=20`.
    #[must_use]
    pub fn clamped(long_units: u8, repeat_units: u8) -> Self {
        Self {
            long: long_units.clamp(Self::MIN_UNITS, Self::MAX_UNITS),
            repeat: repeat_units.clamp(Self::MIN_UNITS, Self::MAX_UNITS),
        }
    }

    fn check(units: u8) -> Result<(), OutOfRangeError> {
        if (Self::MIN_UNITS..=Self::MAX_UNITS).contains(&units) {
            Ok(())
        } else {
            Err(OutOfRangeError {
                value: u32::from(units),
                min: u32::from(Self::MIN_UNITS),
                max: u32::from(Self::MAX_UNITS),
            })
        }
    }

    /// Long-press setting in 100 ms units.
    #[must_use]
    pub fn long_units(self) -> u8 {
        self.long
    }

    /// Repeat setting in 100 ms units.
    #[must_use]
    pub fn repeat_units(self) -> u8 {
        self.repeat
    }

    /// Long-press duration in UI ticks.
    #[must_use]
    pub fn long_ticks(self) -> u32 {
        u32::from(self.long).saturating_mul(TIMER_UNIT_TICKS)
    }

    /// Extra-long window for side buttons: 1.5 × the long-press duration.
    #[must_use]
    pub fn extra_long_ticks(self) -> u32 {
        let long = self.long_ticks();
        long.saturating_add(long / 2)
    }

    /// Auto-repeat interval in UI ticks.
    #[must_use]
    pub fn repeat_ticks(self) -> u32 {
        u32::from(self.repeat).saturating_mul(TIMER_UNIT_TICKS)
    }
}

impl Default for KeypadTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read-only view of the persisted settings the UI core consumes.
pub trait SettingsStore {
    /// Current keypad long-press / repeat timings.
    fn keypad_timings(&self) -> KeypadTimings;
}

impl SettingsStore for KeypadTimings {
    fn keypad_timings(&self) -> KeypadTimings {
        *self
    }
}
