//! Key identities, modifier flags and the per-tick key event.

use bitflags::bitflags;

/// Logical key identity.
///
/// Only one key is active at a time; the first key detected wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Digit 0
    Num0,
    /// Digit 1
    Num1,
    /// Digit 2
    Num2,
    /// Digit 3
    Num3,
    /// Digit 4
    Num4,
    /// Digit 5
    Num5,
    /// Digit 6
    Num6,
    /// Digit 7
    Num7,
    /// Digit 8
    Num8,
    /// Digit 9
    Num9,
    /// `*`
    Star,
    /// `#`
    Hash,
    /// Green (accept / menu)
    Green,
    /// Red (back / cancel)
    Red,
    /// Up
    Up,
    /// Down
    Down,
    /// Left
    Left,
    /// Right
    Right,
    /// Front panel up
    FrontUp,
    /// Front panel down
    FrontDown,
    /// Synthetic: rotary encoder clockwise detent
    RotaryIncrement,
    /// Synthetic: rotary encoder counter-clockwise detent
    RotaryDecrement,
    /// Synthetic: character produced by the alpha multi-tap overlay
    Char(char),
}

impl Key {
    const DIGITS: [Key; 10] = [
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
    ];

    /// Key for a decimal digit, `None` above 9.
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<Key> {
        Self::DIGITS.get(usize::from(digit)).copied()
    }

    /// Decimal value of a digit key.
    #[must_use]
    pub fn digit(self) -> Option<u8> {
        Self::DIGITS
            .iter()
            .position(|&k| k == self)
            .and_then(|i| u8::try_from(i).ok())
    }

    /// Keys whose auto-repeat behaves like repeated discrete presses.
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Key::Up | Key::Down | Key::Left | Key::Right | Key::FrontUp | Key::FrontDown
        )
    }

    /// Synthetic rotary keys.
    pub const fn is_rotary(self) -> bool {
        matches!(self, Key::RotaryIncrement | Key::RotaryDecrement)
    }
}

bitflags! {
    /// Modifiers carried by a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyModifiers: u8 {
        /// Key is (still) down.
        const DOWN    = 1 << 0;
        /// Key was released.
        const UP      = 1 << 1;
        /// Held past the long-press threshold.
        const LONG    = 1 << 2;
        /// Discrete press: fresh press, navigation repeat, rotary detent or
        /// committed alpha character.
        const PRESS   = 1 << 3;
        /// Uncommitted alpha multi-tap character.
        const PREVIEW = 1 << 4;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyModifiers {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "KeyModifiers({=u8:#b})", self.bits());
    }
}

/// Key event produced by one keyboard poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Key concerned, `None` on a quiet tick.
    pub key: Option<Key>,
    /// Modifier set, empty on a quiet tick.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Nothing happened.
    pub const NONE: Self = Self {
        key: None,
        modifiers: KeyModifiers::empty(),
    };

    /// Build an event for `key`.
    #[must_use]
    pub const fn new(key: Key, modifiers: KeyModifiers) -> Self {
        Self {
            key: Some(key),
            modifiers,
        }
    }

    /// `true` if this event is for `key` and carries every flag in `modifiers`.
    #[must_use]
    pub fn is(&self, key: Key, modifiers: KeyModifiers) -> bool {
        self.key == Some(key) && self.modifiers.contains(modifiers)
    }

    /// Change signal for this event.
    #[must_use]
    pub fn signal(&self) -> EventSignal {
        if self.modifiers.is_empty() {
            EventSignal::None
        } else {
            EventSignal::Change
        }
    }
}

/// Whether a poll produced something worth dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventSignal {
    /// Quiet tick.
    #[default]
    None,
    /// The caller should re-dispatch / re-render.
    Change,
}
