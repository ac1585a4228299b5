//! Audible feedback abstraction
//!
//! Melody generation (beep synthesis through the audio amplifier) is outside
//! the UI core. The navigator only decides *which* tone a tick deserves.

/// Feedback tones the UI can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    /// Plain key-press beep.
    KeyBeep,
    /// List navigation wrapped back to its first item.
    FirstItem,
    /// Acknowledge a character or digit typed into an input field.
    InputAck,
    /// Action accepted.
    Ack,
    /// Action rejected.
    Error,
}

/// Sink for feedback tones.
pub trait TonePlayer {
    /// Queue `tone` for playback. Must not block.
    fn play(&mut self, tone: Tone);
}
