//! The event handed to the active screen every tick.

use bitflags::bitflags;
use input::{ButtonEvent, ButtonMask, ButtonPoll, EventSignal, KeyEvent, KeyModifiers, KeyPoll};

bitflags! {
    /// Where an event came from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EventSources: u8 {
        /// Keypad matrix (including alpha characters).
        const KEY      = 1 << 0;
        /// Side buttons.
        const BUTTON   = 1 << 1;
        /// Quick-key replay.
        const FUNCTION = 1 << 2;
        /// Rotary encoder detent.
        const ROTARY   = 1 << 3;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EventSources {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EventSources({=u8:#b})", self.bits());
    }
}

/// Input event for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiEvent {
    /// Something happened this tick.
    pub has_event: bool,
    /// Which inputs contributed.
    pub sources: EventSources,
    /// Key identity and modifiers.
    pub key: KeyEvent,
    /// Held buttons and button transition flags.
    pub buttons: ButtonMask,
    /// Quick-key function code, zero unless `sources` has `FUNCTION`.
    pub function: u16,
    /// Tick timestamp.
    pub time: u32,
}

impl UiEvent {
    /// A tick with nothing to report.
    #[must_use]
    pub const fn quiet(time: u32) -> Self {
        Self {
            has_event: false,
            sources: EventSources::empty(),
            key: KeyEvent::NONE,
            buttons: ButtonMask::empty(),
            function: 0,
            time,
        }
    }

    /// Combine the classifier outputs of one tick.
    #[must_use]
    pub fn from_input(key: KeyPoll, buttons: ButtonPoll, time: u32) -> Self {
        let mut sources = EventSources::empty();
        if key.signal == EventSignal::Change {
            sources |= EventSources::KEY;
            if key.event.key.is_some_and(input::Key::is_rotary) {
                sources |= EventSources::ROTARY;
            }
        }
        if buttons.event == ButtonEvent::Change {
            sources |= EventSources::BUTTON;
        }
        Self {
            has_event: !sources.is_empty(),
            sources,
            key: key.event,
            buttons: buttons.mask,
            function: 0,
            time,
        }
    }

    /// Synthetic event replaying a quick-key function.
    #[must_use]
    pub const fn function(code: u16, time: u32) -> Self {
        Self {
            has_event: true,
            sources: EventSources::FUNCTION,
            key: KeyEvent::NONE,
            buttons: ButtonMask::empty(),
            function: code,
            time,
        }
    }

    /// Key event with the given key and modifiers (mainly for tests and demo
    /// screens).
    #[must_use]
    pub fn key(key: input::Key, modifiers: KeyModifiers, time: u32) -> Self {
        let mut sources = EventSources::KEY;
        if key.is_rotary() {
            sources |= EventSources::ROTARY;
        }
        Self {
            has_event: true,
            sources,
            key: KeyEvent::new(key, modifiers),
            buttons: ButtonMask::empty(),
            function: 0,
            time,
        }
    }

    /// `true` for events caused by the user rather than by a replay.
    pub fn is_user(&self) -> bool {
        self.has_event && !self.sources.contains(EventSources::FUNCTION)
    }

    /// `true` if the key payload carries `PRESS`.
    pub fn is_press(&self) -> bool {
        self.key.modifiers.contains(KeyModifiers::PRESS)
    }
}
