//! GPIO-driven feedback sinks: piezo beeper and display backlight.
//!
//! Both are stepped from the UI tick, so their timing is expressed in
//! ticks and shares the tick's jitter.

use embedded_hal::digital::OutputPin;
use input::Countdown;
use platform::{Backlight, Tone, TonePlayer};

/// Backlight stays on this long after the last input.
pub const BACKLIGHT_TIMEOUT_TICKS: u32 = 10_000;

/// Beep length for `tone`, in ticks.
pub const fn tone_ticks(tone: Tone) -> u32 {
    match tone {
        Tone::KeyBeep => 15,
        Tone::FirstItem | Tone::InputAck => 30,
        Tone::Ack => 60,
        Tone::Error => 200,
    }
}

/// Gated piezo beeper. A newer tone cuts the current one short.
pub struct Beeper<P> {
    pin: P,
    timer: Countdown,
    enabled: bool,
}

impl<P: OutputPin> Beeper<P> {
    /// Wrap the piezo gate pin. The beeper starts silent and enabled.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            timer: Countdown::Disarmed,
            enabled: true,
        }
    }

    /// Mute or unmute key beeps.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.silence();
        }
    }

    /// `true` while a tone is sounding.
    pub fn is_sounding(&self) -> bool {
        self.timer.is_running()
    }

    /// Advance one tick.
    pub fn tick(&mut self) {
        self.timer.tick();
        if self.timer.is_expired() {
            self.silence();
        }
    }

    fn silence(&mut self) {
        self.timer.disarm();
        let _ = self.pin.set_low();
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> TonePlayer for Beeper<P> {
    fn play(&mut self, tone: Tone) {
        if !self.enabled {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("beep {}", tone);
        if self.pin.set_high().is_ok() {
            self.timer.arm(tone_ticks(tone));
        }
    }
}

/// Backlight enable pin with an idle timeout.
pub struct BacklightPin<P> {
    pin: P,
    timer: Countdown,
    timeout: u32,
}

impl<P: OutputPin> BacklightPin<P> {
    /// Wrap the enable pin with the default timeout.
    pub fn new(pin: P) -> Self {
        Self::with_timeout(pin, BACKLIGHT_TIMEOUT_TICKS)
    }

    /// Wrap the enable pin with a custom timeout.
    pub fn with_timeout(pin: P, timeout: u32) -> Self {
        Self {
            pin,
            timer: Countdown::Disarmed,
            timeout,
        }
    }

    /// `true` while the backlight is on.
    pub fn is_on(&self) -> bool {
        self.timer.is_running()
    }

    /// Advance one tick, switching off once the timeout runs out.
    pub fn tick(&mut self) {
        self.timer.tick();
        if self.timer.is_expired() {
            self.timer.disarm();
            let _ = self.pin.set_low();
        }
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Backlight for BacklightPin<P> {
    fn wake(&mut self) {
        // Only touch the pin on the off -> on edge.
        if !self.is_on() && self.pin.set_high().is_err() {
            return;
        }
        self.timer.arm(self.timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_beep_lasts_its_tone_length() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut beeper = Beeper::new(pin);
        beeper.play(Tone::KeyBeep);
        for _ in 1..tone_ticks(Tone::KeyBeep) {
            beeper.tick();
            assert!(beeper.is_sounding());
        }
        beeper.tick();
        assert!(!beeper.is_sounding());
        beeper.release().done();
    }

    #[test]
    fn test_muted_beeper_stays_silent() {
        let pin = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut beeper = Beeper::new(pin);
        beeper.set_enabled(false);
        beeper.play(Tone::Error);
        assert!(!beeper.is_sounding());
        beeper.release().done();
    }

    #[test]
    fn test_backlight_wake_extends_timeout() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut bl = BacklightPin::with_timeout(pin, 3);
        bl.wake();
        bl.tick();
        bl.tick();
        // Second wake while on: no pin write, timer restarts.
        bl.wake();
        bl.tick();
        bl.tick();
        assert!(bl.is_on());
        bl.tick();
        assert!(!bl.is_on());
        bl.release().done();
    }
}
