//! Per-tick input pipeline: sample, classify, dispatch, give feedback.
//!
//! ```text
//! RawInput ─┬─ button levels ──▶ ButtonClassifier ─┐
//!           └─ scancode ───────▶ Keyboard ◀─ rotary┴─▶ UiEvent ─▶ Navigator
//!                                   ▲                                │
//!                                   └──── alpha mode ◀── TickOutcome ┴─▶ tone, backlight
//! ```
//!
//! The buttons are classified before the keypad so the combo guard sees
//! whether a key was down on the previous tick.

use input::{ButtonClassifier, Keyboard};
use platform::{Backlight, RawInput, RotaryEncoder, SettingsStore, TonePlayer};
use ui::{Navigator, TickOutcome, UiEvent};

/// Everything the pipeline talks to besides the navigator.
pub struct Devices<I, S, T, B> {
    /// Matrix and button sampler
    pub input: I,
    /// Keypad timing settings
    pub settings: S,
    /// Feedback tones
    pub tones: T,
    /// Display backlight
    pub backlight: B,
}

/// Input classification state owned by the UI task.
#[derive(Debug, Clone, Default)]
pub struct InputPipeline {
    keyboard: Keyboard,
    buttons: ButtonClassifier,
    time: u32,
}

impl InputPipeline {
    /// Nothing pressed, time zero.
    pub const fn new() -> Self {
        Self {
            keyboard: Keyboard::new(),
            buttons: ButtonClassifier::new(),
            time: 0,
        }
    }

    /// Ticks since start-up (wraps).
    pub fn time(&self) -> u32 {
        self.time
    }

    /// Keyboard classifier.
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Button classifier.
    pub fn buttons(&self) -> &ButtonClassifier {
        &self.buttons
    }

    /// Sample and classify one tick.
    pub fn sample<I, S>(&mut self, input: &mut I, settings: &S, rotary: &RotaryEncoder) -> UiEvent
    where
        I: RawInput,
        S: SettingsStore,
    {
        self.time = self.time.wrapping_add(1);
        let timings = settings.keypad_timings();

        let levels = input.read_button_levels();
        let buttons = self.buttons.poll(levels, self.keyboard.is_key_down(), timings);

        let scancode = input.read_key_scancode();
        let turn = rotary.take().map(|t| t.direction);
        let key = self.keyboard.poll(scancode, turn, timings);

        UiEvent::from_input(key, buttons, self.time)
    }

    /// Apply a tick's outcome to the sinks and the keyboard.
    pub fn apply<T, B>(&mut self, outcome: &TickOutcome, tones: &mut T, backlight: &mut B)
    where
        T: TonePlayer,
        B: Backlight,
    {
        if outcome.wake_backlight {
            backlight.wake();
        }
        if let Some(tone) = outcome.tone {
            tones.play(tone);
        }
        if let Some(enabled) = outcome.alpha_mode {
            #[cfg(feature = "defmt")]
            defmt::debug!("alpha mode {}", enabled);
            self.keyboard.set_alpha_mode(enabled);
        }
    }

    /// One full UI tick.
    pub fn tick<A, I, S, T, B>(
        &mut self,
        nav: &mut Navigator<'_, A>,
        app: &mut A,
        devices: &mut Devices<I, S, T, B>,
        rotary: &RotaryEncoder,
    ) -> TickOutcome
    where
        I: RawInput,
        S: SettingsStore,
        T: TonePlayer,
        B: Backlight,
    {
        let event = self.sample(&mut devices.input, &devices.settings, rotary);
        let outcome = nav.tick(app, event);
        self.apply(&outcome, &mut devices.tones, &mut devices.backlight);
        outcome
    }
}
