//! PTT / SK1 / SK2 press classification.
//!
//! Each button runs its own small machine:
//!
//! ```text
//! RELEASED ──down──▶ PRESSED ──long──▶ LONG ──1.5 × long──▶ EXTRA_LONG
//!     ▲                 │ up: SHORT_UP    │ up                 │ up
//!     └─────────────────┴─────────────────┴────────────────────┘
//! ```
//!
//! `LONG_DOWN` is reported on the tick the threshold is crossed.
//! `EXTRA_LONG_DOWN` is reported on every tick while the button stays held.

use bitflags::bitflags;
use platform::{Button, ButtonLevels, KeypadTimings};

use crate::timer::Countdown;

bitflags! {
    /// Held buttons plus per-button transition flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonMask: u16 {
        /// PTT held
        const PTT                 = 1 << 0;
        /// SK1 held
        const SK1                 = 1 << 1;
        /// SK2 held
        const SK2                 = 1 << 2;
        /// PTT released after a short press
        const PTT_SHORT_UP        = 1 << 3;
        /// PTT crossed the long threshold this tick
        const PTT_LONG_DOWN       = 1 << 4;
        /// PTT held past the extra-long threshold
        const PTT_EXTRA_LONG_DOWN = 1 << 5;
        /// SK1 released after a short press
        const SK1_SHORT_UP        = 1 << 6;
        /// SK1 crossed the long threshold this tick
        const SK1_LONG_DOWN       = 1 << 7;
        /// SK1 held past the extra-long threshold
        const SK1_EXTRA_LONG_DOWN = 1 << 8;
        /// SK2 released after a short press
        const SK2_SHORT_UP        = 1 << 9;
        /// SK2 crossed the long threshold this tick
        const SK2_LONG_DOWN       = 1 << 10;
        /// SK2 held past the extra-long threshold
        const SK2_EXTRA_LONG_DOWN = 1 << 11;

        /// Every held bit.
        const HELD = Self::PTT.bits() | Self::SK1.bits() | Self::SK2.bits();
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ButtonMask {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ButtonMask({=u16:#b})", self.bits());
    }
}

impl ButtonMask {
    /// Held bit for `button`.
    pub const fn held(button: Button) -> Self {
        match button {
            Button::Ptt => Self::PTT,
            Button::Sk1 => Self::SK1,
            Button::Sk2 => Self::SK2,
        }
    }

    /// Short-release flag for `button`.
    pub const fn short_up(button: Button) -> Self {
        match button {
            Button::Ptt => Self::PTT_SHORT_UP,
            Button::Sk1 => Self::SK1_SHORT_UP,
            Button::Sk2 => Self::SK2_SHORT_UP,
        }
    }

    /// Long-press flag for `button`.
    pub const fn long_down(button: Button) -> Self {
        match button {
            Button::Ptt => Self::PTT_LONG_DOWN,
            Button::Sk1 => Self::SK1_LONG_DOWN,
            Button::Sk2 => Self::SK2_LONG_DOWN,
        }
    }

    /// Extra-long flag for `button`.
    pub const fn extra_long_down(button: Button) -> Self {
        match button {
            Button::Ptt => Self::PTT_EXTRA_LONG_DOWN,
            Button::Sk1 => Self::SK1_EXTRA_LONG_DOWN,
            Button::Sk2 => Self::SK2_EXTRA_LONG_DOWN,
        }
    }

    /// Every transition flag (anything but the held bits).
    pub fn transitions(self) -> Self {
        self.difference(Self::HELD)
    }

    /// `true` if `button` is held.
    pub fn is_held(self, button: Button) -> bool {
        self.contains(Self::held(button))
    }
}

/// Change signal for a button poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Nothing new.
    #[default]
    None,
    /// Held set changed or a transition flag is present.
    Change,
}

/// Result of one button poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPoll {
    /// Held bits and transition flags.
    pub mask: ButtonMask,
    /// Whether the caller should re-dispatch.
    pub event: ButtonEvent,
}

/// Stage of a single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonStage {
    /// Up.
    #[default]
    Released,
    /// Down, long threshold not reached.
    Pressed,
    /// Down past the long threshold.
    Long,
    /// Down past the extra-long threshold.
    ExtraLong,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tracker {
    stage: ButtonStage,
    timer: Countdown,
    // Used as a modifier for a keypad combo: report no transitions.
    consumed: bool,
}

impl Tracker {
    const fn new() -> Self {
        Self {
            stage: ButtonStage::Released,
            timer: Countdown::Disarmed,
            consumed: false,
        }
    }

    /// Advance one tick, returning this button's contribution to the mask.
    fn step(&mut self, button: Button, down: bool, timings: KeypadTimings) -> ButtonMask {
        self.timer.tick();

        if !down {
            let flags = if self.stage == ButtonStage::Pressed && !self.consumed {
                ButtonMask::short_up(button)
            } else {
                ButtonMask::empty()
            };
            *self = Self::new();
            return flags;
        }

        let mut flags = ButtonMask::held(button);
        match self.stage {
            ButtonStage::Released => {
                self.stage = ButtonStage::Pressed;
                self.timer.arm(timings.long_ticks());
            }
            ButtonStage::Pressed if self.timer.is_expired() => {
                self.stage = ButtonStage::Long;
                self.timer.arm(timings.extra_long_ticks());
                flags |= ButtonMask::long_down(button);
            }
            ButtonStage::Long if self.timer.is_expired() => {
                self.stage = ButtonStage::ExtraLong;
                self.timer.disarm();
                flags |= ButtonMask::extra_long_down(button);
            }
            ButtonStage::ExtraLong => flags |= ButtonMask::extra_long_down(button),
            ButtonStage::Pressed | ButtonStage::Long => {}
        }

        if self.consumed {
            flags = flags.intersection(ButtonMask::HELD);
        }
        flags
    }
}

/// Side-button classifier context.
#[derive(Debug, Clone)]
pub struct ButtonClassifier {
    trackers: [Tracker; 3],
    // Held bits of the previous poll.
    previous: ButtonMask,
    // Raw levels when the combo guard engaged.
    guard: Option<ButtonLevels>,
}

impl ButtonClassifier {
    /// Create a classifier with every button released.
    pub const fn new() -> Self {
        Self {
            trackers: [Tracker::new(); 3],
            previous: ButtonMask::empty(),
            guard: None,
        }
    }

    /// Stage of `button`.
    pub fn stage(&self, button: Button) -> ButtonStage {
        self.trackers
            .get(button.index())
            .map_or(ButtonStage::Released, |t| t.stage)
    }

    /// `true` while the combo guard is suppressing change events.
    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Advance one tick.
    ///
    /// `key_is_down` tells whether a keypad key was held on the previous tick.
    /// Buttons held together with a key are treated as modifiers: they report
    /// no transitions, and change events stay suppressed until the raw levels
    /// move.
    pub fn poll(
        &mut self,
        levels: ButtonLevels,
        key_is_down: bool,
        timings: KeypadTimings,
    ) -> ButtonPoll {
        let combo = key_is_down && !levels.is_released();

        let mut mask = ButtonMask::empty();
        for button in Button::ALL {
            if let Some(tracker) = self.trackers.get_mut(button.index()) {
                let down = levels.is_down(button);
                if combo && down {
                    tracker.consumed = true;
                }
                mask |= tracker.step(button, down, timings);
            }
        }

        let event = match self.guard {
            Some(guarded) => {
                if levels != guarded {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("button guard released at {}", mask);
                    self.guard = if combo { Some(levels) } else { None };
                }
                ButtonEvent::None
            }
            None if combo => {
                self.guard = Some(levels);
                ButtonEvent::None
            }
            None => {
                let held = mask.intersection(ButtonMask::HELD);
                if held != self.previous || !mask.transitions().is_empty() {
                    ButtonEvent::Change
                } else {
                    ButtonEvent::None
                }
            }
        };
        self.previous = mask.intersection(ButtonMask::HELD);

        #[cfg(feature = "defmt")]
        if event == ButtonEvent::Change {
            defmt::trace!("buttons {}", mask);
        }

        ButtonPoll { mask, event }
    }
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: KeypadTimings = KeypadTimings::DEFAULT;

    fn sk1() -> ButtonLevels {
        ButtonLevels::RELEASED.with(Button::Sk1)
    }

    #[test]
    fn test_short_press_emits_short_up() {
        let mut c = ButtonClassifier::new();
        let first = c.poll(sk1(), false, T);
        assert_eq!(first.mask, ButtonMask::SK1);
        assert_eq!(first.event, ButtonEvent::Change);
        for _ in 0..50 {
            assert_eq!(c.poll(sk1(), false, T).event, ButtonEvent::None);
        }
        let up = c.poll(ButtonLevels::RELEASED, false, T);
        assert_eq!(up.mask, ButtonMask::SK1_SHORT_UP);
        assert_eq!(up.event, ButtonEvent::Change);
        assert_eq!(c.stage(Button::Sk1), ButtonStage::Released);
    }

    #[test]
    fn test_long_down_on_threshold_tick_only() {
        let mut c = ButtonClassifier::new();
        c.poll(sk1(), false, T);
        for _ in 1..T.long_ticks() {
            assert!(c.poll(sk1(), false, T).mask.transitions().is_empty());
        }
        let long = c.poll(sk1(), false, T);
        assert_eq!(long.mask, ButtonMask::SK1 | ButtonMask::SK1_LONG_DOWN);
        assert_eq!(c.stage(Button::Sk1), ButtonStage::Long);
        let next = c.poll(sk1(), false, T);
        assert_eq!(next.mask, ButtonMask::SK1);
        assert_eq!(next.event, ButtonEvent::None);
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut c = ButtonClassifier::new();
        let both = ButtonLevels::RELEASED.with(Button::Ptt).with(Button::Sk2);
        c.poll(both, false, T);
        let only_sk2 = ButtonLevels::RELEASED.with(Button::Sk2);
        let poll = c.poll(only_sk2, false, T);
        assert_eq!(poll.mask, ButtonMask::SK2 | ButtonMask::PTT_SHORT_UP);
        assert_eq!(c.stage(Button::Sk2), ButtonStage::Pressed);
    }

    #[test]
    fn test_combo_consumes_button() {
        let mut c = ButtonClassifier::new();
        let sk2 = ButtonLevels::RELEASED.with(Button::Sk2);
        assert_eq!(c.poll(sk2, false, T).event, ButtonEvent::Change);
        // A digit goes down while SK2 is held.
        let guarded = c.poll(sk2, true, T);
        assert_eq!(guarded.mask, ButtonMask::SK2);
        assert_eq!(guarded.event, ButtonEvent::None);
        assert!(c.is_guarded());
        // Release: no SHORT_UP, no change while the guard lets go.
        let released = c.poll(ButtonLevels::RELEASED, false, T);
        assert_eq!(released.mask, ButtonMask::empty());
        assert_eq!(released.event, ButtonEvent::None);
        assert!(!c.is_guarded());
        // Fresh press afterwards reports normally.
        assert_eq!(c.poll(sk2, false, T).event, ButtonEvent::Change);
    }
}
