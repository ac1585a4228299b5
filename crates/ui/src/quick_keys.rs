//! Quick keys: one-touch replay of a recorded screen action.
//!
//! SK2 + digit arms capture for that digit. The next bindable action a
//! screen reports through [`Context::record_quick_key_action`] is stored as
//! (screen, function code). A long press of the digit later replays it; if
//! the replay had to open the screen, the navigator closes it again after
//! [`QUICK_KEY_REVERT_TICKS`] unless the user confirms with a successful
//! action. Neither gesture is recognised while a screen has alpha mode on.
//!
//! [`Context::record_quick_key_action`]: crate::navigation::Context::record_quick_key_action

use input::{ButtonMask, Countdown, KeyModifiers};
use platform::config::{QUICK_KEY_REVERT_TICKS, QUICK_KEY_SLOTS};

use crate::event::UiEvent;
use crate::screen::ScreenId;

/// A recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuickKeyBinding {
    /// Screen that performed the action.
    pub screen: ScreenId,
    /// Screen-defined function code.
    pub function: u16,
}

/// What a tick's event means for quick keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QuickKeyGesture {
    /// SK2 + digit press: start capture.
    Capture(u8),
    /// Long press of a digit without SK2: replay.
    Replay(u8),
    /// Not a quick-key gesture.
    None,
}

impl QuickKeyGesture {
    /// Classify `event`.
    pub fn of(event: &UiEvent) -> Self {
        let Some(digit) = event.key.key.and_then(input::Key::digit) else {
            return QuickKeyGesture::None;
        };
        let sk2 = event.buttons.contains(ButtonMask::SK2);
        let mods = event.key.modifiers;
        if sk2 && mods.contains(KeyModifiers::DOWN | KeyModifiers::PRESS) {
            QuickKeyGesture::Capture(digit)
        } else if !sk2 && mods.contains(KeyModifiers::LONG | KeyModifiers::DOWN) {
            QuickKeyGesture::Replay(digit)
        } else {
            QuickKeyGesture::None
        }
    }
}

/// Replay waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingRevert {
    /// Screen opened by the replay.
    pub screen: ScreenId,
    /// Stack depth right after it was opened.
    pub depth: usize,
    timer: Countdown,
}

/// Quick-key bindings plus capture and revert state.
#[derive(Debug, Clone)]
pub struct QuickKeys {
    bindings: [Option<QuickKeyBinding>; QUICK_KEY_SLOTS],
    capture: Option<u8>,
    revert: Option<PendingRevert>,
}

impl QuickKeys {
    /// No bindings.
    pub const fn new() -> Self {
        Self {
            bindings: [None; QUICK_KEY_SLOTS],
            capture: None,
            revert: None,
        }
    }

    /// Binding for `digit`.
    pub fn binding(&self, digit: u8) -> Option<QuickKeyBinding> {
        self.bindings.get(usize::from(digit)).copied().flatten()
    }

    /// Store a binding, e.g. restored from settings. Digits above 9 are
    /// ignored.
    pub fn bind(&mut self, digit: u8, binding: QuickKeyBinding) {
        if let Some(slot) = self.bindings.get_mut(usize::from(digit)) {
            *slot = Some(binding);
        }
    }

    /// Forget the binding for `digit`.
    pub fn clear(&mut self, digit: u8) {
        if let Some(slot) = self.bindings.get_mut(usize::from(digit)) {
            *slot = None;
        }
    }

    /// Digit waiting for an action, if capture is armed.
    pub fn capture(&self) -> Option<u8> {
        self.capture
    }

    /// Arm capture for `digit`.
    pub fn arm_capture(&mut self, digit: u8) {
        #[cfg(feature = "defmt")]
        defmt::debug!("quick key {} capture armed", digit);
        self.capture = Some(digit);
    }

    /// Drop an armed capture.
    pub fn cancel_capture(&mut self) {
        self.capture = None;
    }

    /// Bind `function` on `screen` to the armed digit. Returns the digit, or
    /// `None` if capture was not armed.
    pub fn record(&mut self, screen: ScreenId, function: u16) -> Option<u8> {
        let digit = self.capture.take()?;
        self.bind(digit, QuickKeyBinding { screen, function });
        #[cfg(feature = "defmt")]
        defmt::debug!("quick key {} bound to {}:{}", digit, screen, function);
        Some(digit)
    }

    /// Replay waiting for confirmation.
    pub fn pending_revert(&self) -> Option<PendingRevert> {
        self.revert
    }

    pub(crate) fn start_revert(&mut self, screen: ScreenId, depth: usize) {
        self.revert = Some(PendingRevert {
            screen,
            depth,
            timer: Countdown::armed(QUICK_KEY_REVERT_TICKS),
        });
    }

    /// The user accepted the replayed action: keep it.
    pub fn confirm(&mut self) {
        self.revert = None;
    }

    /// Advance the revert timer, returning the revert once it is due.
    pub(crate) fn tick(&mut self) -> Option<PendingRevert> {
        let pending = self.revert.as_mut()?;
        pending.timer.tick();
        if pending.timer.is_expired() {
            self.revert.take()
        } else {
            None
        }
    }
}

impl Default for QuickKeys {
    fn default() -> Self {
        Self::new()
    }
}
