//! Keypad matrix debounce and key-event state machine.
//!
//! ```text
//!            nonzero              count > 20, same code
//!   IDLE ───────────▶ DEBOUNCE ─────────────────────────▶ PRESS
//!    ▲  ◀── zero ────────┤ other code                       │ DOWN|PRESS
//!    │ zero              ▼                                  ▼
//!    └──────────── WAIT_RELEASED          IDLE ◀─ UP ── WAIT_LONG
//!                                          ▲               │ long expired: LONG|DOWN
//!                                          └── LONG|UP ── REPEAT ◀┘ LONG every tick
//! ```
//!
//! A pending rotary detent pre-empts the matrix for one tick. In alpha mode
//! fresh presses of digit keys and `*` are turned into multi-tap previews and
//! committed characters.

use platform::config::{ALPHA_TIMEOUT_TICKS, KEY_DEBOUNCE_TICKS};
use platform::{KeypadTimings, RotaryDirection, Scancode};

use crate::alpha::{self, MultiTap};
use crate::key::{EventSignal, Key, KeyEvent, KeyModifiers};
use crate::keymap;
use crate::timer::Countdown;

/// Matrix state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Nothing down.
    #[default]
    Idle,
    /// Waiting for the candidate scancode to settle.
    Debounce,
    /// Accepted; the press is reported on the next tick.
    Press,
    /// Held, long-press timer running.
    WaitLong,
    /// Held past the long-press threshold.
    Repeat,
    /// Noise or unknown code seen; wait for a full release.
    WaitRelease,
}

/// Result of one keyboard poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPoll {
    /// Event for this tick ([`KeyEvent::NONE`] when quiet).
    pub event: KeyEvent,
    /// `Change` whenever the event carries modifiers.
    pub signal: EventSignal,
}

/// Keyboard classifier context.
#[derive(Debug, Clone)]
pub struct Keyboard {
    state: KeyState,
    debounce_count: u16,
    candidate: Scancode,
    key: Option<Key>,
    long_timer: Countdown,
    alpha_timer: Countdown,
    alpha_mode: bool,
    multi_tap: MultiTap,
    pending: Option<KeyEvent>,
}

impl Keyboard {
    /// Create a keyboard in the idle state with alpha mode off.
    pub const fn new() -> Self {
        Self {
            state: KeyState::Idle,
            debounce_count: 0,
            candidate: Scancode::NONE,
            key: None,
            long_timer: Countdown::Disarmed,
            alpha_timer: Countdown::Disarmed,
            alpha_mode: false,
            multi_tap: MultiTap::new(),
            pending: None,
        }
    }

    /// Current matrix state.
    pub fn state(&self) -> KeyState {
        self.state
    }

    /// `true` while an accepted key is held.
    pub fn is_key_down(&self) -> bool {
        matches!(
            self.state,
            KeyState::Press | KeyState::WaitLong | KeyState::Repeat
        )
    }

    /// `true` when multi-tap text entry is enabled.
    pub fn alpha_mode(&self) -> bool {
        self.alpha_mode
    }

    /// Enable or disable multi-tap text entry. Disabling drops any
    /// uncommitted character.
    pub fn set_alpha_mode(&mut self, enabled: bool) {
        if !enabled {
            self.multi_tap.reset();
            self.pending = None;
        }
        self.alpha_mode = enabled;
    }

    /// Character currently previewed by the multi-tap overlay.
    pub fn alpha_preview(&self) -> Option<char> {
        self.multi_tap.current()
    }

    /// Back to idle, abandoning every timer and the alpha sequence.
    pub fn reset(&mut self) {
        let alpha_mode = self.alpha_mode;
        *self = Self::new();
        self.alpha_mode = alpha_mode;
    }

    /// Advance one tick.
    ///
    /// `rotary` is the direction taken from the encoder this tick, if any.
    pub fn poll(
        &mut self,
        scancode: Scancode,
        rotary: Option<RotaryDirection>,
        timings: KeypadTimings,
    ) -> KeyPoll {
        self.long_timer.tick();
        self.alpha_timer.tick();

        let event = if let Some(direction) = rotary {
            let key = match direction {
                RotaryDirection::Increment => Key::RotaryIncrement,
                RotaryDirection::Decrement => Key::RotaryDecrement,
            };
            KeyEvent::new(key, KeyModifiers::UP | KeyModifiers::PRESS)
        } else if let Some(pending) = self.pending.take() {
            pending
        } else {
            let alpha_expired = self.alpha_timer.is_expired();
            let event = self.step(scancode, timings);
            if self.alpha_mode {
                self.overlay_alpha(event, alpha_expired)
            } else {
                event
            }
        };

        #[cfg(feature = "defmt")]
        if !event.modifiers.is_empty() {
            defmt::trace!("key event {}", event);
        }

        KeyPoll {
            event,
            signal: event.signal(),
        }
    }

    fn enter(&mut self, next: KeyState) {
        #[cfg(feature = "defmt")]
        defmt::trace!("keyboard {} -> {}", self.state, next);
        self.state = next;
    }

    fn held(&self, modifiers: KeyModifiers) -> KeyEvent {
        match self.key {
            Some(key) => KeyEvent::new(key, modifiers),
            None => KeyEvent::NONE,
        }
    }

    fn step(&mut self, scancode: Scancode, timings: KeypadTimings) -> KeyEvent {
        match self.state {
            KeyState::Idle => {
                if !scancode.is_none() {
                    self.debounce_count = 0;
                    self.candidate = scancode;
                    self.enter(KeyState::Debounce);
                }
                KeyEvent::NONE
            }
            KeyState::Debounce => {
                if scancode != self.candidate {
                    // Bounced before acceptance: a release starts over, another
                    // code has to be released first.
                    if scancode.is_none() {
                        self.enter(KeyState::Idle);
                    } else {
                        self.enter(KeyState::WaitRelease);
                    }
                    return KeyEvent::NONE;
                }
                self.debounce_count = self.debounce_count.saturating_add(1);
                if self.debounce_count > KEY_DEBOUNCE_TICKS {
                    match keymap::key_for(scancode) {
                        Some(key) => {
                            self.key = Some(key);
                            self.enter(KeyState::Press);
                        }
                        None => self.enter(KeyState::WaitRelease),
                    }
                }
                KeyEvent::NONE
            }
            KeyState::Press if scancode.is_none() => {
                self.key = None;
                self.enter(KeyState::Idle);
                KeyEvent::NONE
            }
            KeyState::Press => {
                self.long_timer.arm(timings.long_ticks());
                self.alpha_timer.arm(ALPHA_TIMEOUT_TICKS);
                self.enter(KeyState::WaitLong);
                self.held(KeyModifiers::DOWN | KeyModifiers::PRESS)
            }
            KeyState::WaitLong => {
                if scancode.is_none() {
                    self.long_timer.disarm();
                    self.enter(KeyState::Idle);
                    self.held(KeyModifiers::UP)
                } else if self.long_timer.is_expired() {
                    self.long_timer.arm(timings.repeat_ticks());
                    self.enter(KeyState::Repeat);
                    self.held(KeyModifiers::LONG | KeyModifiers::DOWN)
                } else {
                    KeyEvent::NONE
                }
            }
            KeyState::Repeat => {
                if scancode.is_none() {
                    self.long_timer.disarm();
                    self.enter(KeyState::Idle);
                    return self.held(KeyModifiers::LONG | KeyModifiers::UP);
                }
                let mut modifiers = KeyModifiers::LONG;
                if self.long_timer.is_expired() {
                    self.long_timer.arm(timings.repeat_ticks());
                    if self.key.is_some_and(Key::is_navigation) {
                        modifiers |= KeyModifiers::PRESS;
                    }
                }
                self.held(modifiers)
            }
            KeyState::WaitRelease => {
                if scancode.is_none() {
                    self.enter(KeyState::Idle);
                }
                KeyEvent::NONE
            }
        }
    }

    fn overlay_alpha(&mut self, event: KeyEvent, alpha_expired: bool) -> KeyEvent {
        let fresh_press = event.modifiers == (KeyModifiers::DOWN | KeyModifiers::PRESS);
        let Some(key) = event.key.filter(|_| fresh_press) else {
            // Timeout with the key released: commit the buffered character.
            let holding = matches!(self.state, KeyState::WaitLong | KeyState::Repeat);
            if event.modifiers.is_empty() && alpha_expired && !holding {
                if let Some(ch) = self.multi_tap.commit() {
                    self.alpha_timer.disarm();
                    return KeyEvent::new(Key::Char(ch), KeyModifiers::PRESS);
                }
            }
            return event;
        };

        match self.multi_tap.key() {
            Some(active) if active == key && !alpha_expired => self
                .multi_tap
                .advance()
                .map_or(event, |ch| KeyEvent::new(Key::Char(ch), KeyModifiers::PREVIEW)),
            Some(_) => {
                let committed = self.multi_tap.commit();
                let follow = self.start_sequence(key, event);
                match committed {
                    Some(ch) => {
                        self.pending = Some(follow);
                        KeyEvent::new(Key::Char(ch), KeyModifiers::PRESS)
                    }
                    None => follow,
                }
            }
            None => self.start_sequence(key, event),
        }
    }

    /// Preview for a new sequence on `key`, or `event` unchanged when the key
    /// has no character table.
    fn start_sequence(&mut self, key: Key, event: KeyEvent) -> KeyEvent {
        if alpha::table(key).is_none() {
            return event;
        }
        self.multi_tap
            .start(key)
            .map_or(event, |ch| KeyEvent::new(Key::Char(ch), KeyModifiers::PREVIEW))
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}
