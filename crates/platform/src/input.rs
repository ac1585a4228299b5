//! Raw input sampling contract
//!
//! The sampler reports what the pins say right now. Levels are settled at the
//! electrical level only (RC / pull-up); all logical debouncing happens in the
//! `input` crate.

/// Raw keypad-matrix scancode.
///
/// Zero means "no key". Non-zero values are board specific; the `input`
/// crate's keymap turns them into key identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Scancode(u8);

impl Scancode {
    /// No key is down.
    pub const NONE: Self = Self(0);

    /// Wrap a raw scancode.
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Return the raw value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// `true` when no key is down.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Physical side/top buttons, independent of the keypad matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Push-to-talk
    Ptt,
    /// Side key 1
    Sk1,
    /// Side key 2 (also the quick-key modifier)
    Sk2,
}

impl Button {
    /// Every button, in bit order.
    pub const ALL: [Button; 3] = [Button::Ptt, Button::Sk1, Button::Sk2];

    /// Bit this button occupies in a [`ButtonLevels`] sample.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Button::Ptt => 1 << 0,
            Button::Sk1 => 1 << 1,
            Button::Sk2 => 1 << 2,
        }
    }

    /// Stable index (0..3) for per-button tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Button::Ptt => 0,
            Button::Sk1 => 1,
            Button::Sk2 => 2,
        }
    }
}

/// Raw "is down" level of every side button, one bit per [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ButtonLevels(u8);

impl ButtonLevels {
    /// All buttons released.
    pub const RELEASED: Self = Self(0);

    const VALID: u8 = Button::Ptt.bit() | Button::Sk1.bit() | Button::Sk2.bit();

    /// Build from a raw bitmask. Bits that name no button are dropped.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::VALID)
    }

    /// Return the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return a copy with `button` marked down.
    #[must_use]
    pub const fn with(self, button: Button) -> Self {
        Self(self.0 | button.bit())
    }

    /// `true` if `button` is down.
    #[must_use]
    pub const fn is_down(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    /// `true` if no button is down.
    #[must_use]
    pub const fn is_released(self) -> bool {
        self.0 == 0
    }
}

/// Raw input sampler: keypad matrix plus side buttons.
///
/// Called once per UI tick. Implementations must not block.
pub trait RawInput {
    /// Scan the keypad matrix. Returns [`Scancode::NONE`] when nothing is down.
    fn read_key_scancode(&mut self) -> Scancode;

    /// Sample the side/top button levels.
    fn read_button_levels(&mut self) -> ButtonLevels;
}
