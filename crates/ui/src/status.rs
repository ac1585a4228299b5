//! Screen status flags and the audio cue they select.

use bitflags::bitflags;
use platform::Tone;

use crate::event::UiEvent;

bitflags! {
    /// Status a screen handler returns from every call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MenuStatus: u8 {
        /// Action accepted.
        const SUCCESS     = 1 << 0;
        /// Action rejected.
        const ERROR       = 1 << 1;
        /// Screen is a scrollable list.
        const LIST_TYPE   = 1 << 2;
        /// Screen is a text/number entry field.
        const INPUT_TYPE  = 1 << 3;
        /// Play the navigation cue even without a key press.
        const FORCE_FIRST = 1 << 4;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MenuStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "MenuStatus({=u8:#b})", self.bits());
    }
}

bitflags! {
    /// One-shot display flags raised by the radio side when fresh QSO caller
    /// data arrives. Visible to screens for one dispatch, then cleared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct QsoFlags: u8 {
        /// Caller ID / name changed.
        const CALLER_DATA  = 1 << 0;
        /// Talker alias received.
        const TALKER_ALIAS = 1 << 1;
        /// Talk group changed.
        const TALK_GROUP   = 1 << 2;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for QsoFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "QsoFlags({=u8:#b})", self.bits());
    }
}

/// Pick the feedback tone for a dispatched event.
///
/// `item_index` is the active screen's item index after the handler ran.
#[must_use]
pub fn select_tone(status: MenuStatus, event: &UiEvent, item_index: usize) -> Option<Tone> {
    let forced = status.contains(MenuStatus::FORCE_FIRST);
    if !event.has_event && !forced {
        return None;
    }
    if status.contains(MenuStatus::ERROR) {
        return Some(Tone::Error);
    }
    if status.contains(MenuStatus::SUCCESS) {
        return Some(Tone::Ack);
    }
    if !(event.is_press() || forced) {
        return None;
    }
    if status.contains(MenuStatus::LIST_TYPE) && item_index == 0 {
        Some(Tone::FirstItem)
    } else if status.contains(MenuStatus::INPUT_TYPE) {
        Some(Tone::InputAck)
    } else {
        Some(Tone::KeyBeep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::{Key, KeyModifiers};

    fn press() -> UiEvent {
        UiEvent::key(Key::Down, KeyModifiers::DOWN | KeyModifiers::PRESS, 0)
    }

    #[test]
    fn test_error_beats_everything() {
        let status = MenuStatus::ERROR | MenuStatus::SUCCESS | MenuStatus::LIST_TYPE;
        assert_eq!(select_tone(status, &press(), 0), Some(Tone::Error));
    }

    #[test]
    fn test_success_acks() {
        assert_eq!(select_tone(MenuStatus::SUCCESS, &press(), 3), Some(Tone::Ack));
    }

    #[test]
    fn test_list_first_item() {
        assert_eq!(
            select_tone(MenuStatus::LIST_TYPE, &press(), 0),
            Some(Tone::FirstItem)
        );
        assert_eq!(
            select_tone(MenuStatus::LIST_TYPE, &press(), 1),
            Some(Tone::KeyBeep)
        );
    }

    #[test]
    fn test_input_ack() {
        assert_eq!(
            select_tone(MenuStatus::INPUT_TYPE, &press(), 5),
            Some(Tone::InputAck)
        );
    }

    #[test]
    fn test_release_is_silent() {
        let up = UiEvent::key(Key::Down, KeyModifiers::UP, 0);
        assert_eq!(select_tone(MenuStatus::empty(), &up, 0), None);
    }

    #[test]
    fn test_force_first_without_event() {
        let quiet = UiEvent::quiet(0);
        assert_eq!(select_tone(MenuStatus::empty(), &quiet, 0), None);
        assert_eq!(
            select_tone(MenuStatus::FORCE_FIRST | MenuStatus::LIST_TYPE, &quiet, 0),
            Some(Tone::FirstItem)
        );
    }
}
