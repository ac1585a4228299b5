//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::*;

/// Capacity of the scripted sample queues.
pub const SCRIPT_CAPACITY: usize = 256;

/// Mock raw input sampler.
///
/// Replays scripted scancode / button-level samples, one per read. Once a
/// script runs dry the last sample keeps being returned, which models a key
/// that is simply still held.
pub struct MockRawInput {
    scancodes: heapless::Deque<Scancode, SCRIPT_CAPACITY>,
    levels: heapless::Deque<ButtonLevels, SCRIPT_CAPACITY>,
    last_scancode: Scancode,
    last_levels: ButtonLevels,
}

impl MockRawInput {
    /// Create a mock with nothing pressed.
    pub fn new() -> Self {
        Self {
            scancodes: heapless::Deque::new(),
            levels: heapless::Deque::new(),
            last_scancode: Scancode::NONE,
            last_levels: ButtonLevels::RELEASED,
        }
    }

    /// Queue `count` consecutive samples of `code`.
    ///
    /// Samples beyond the script capacity are dropped.
    pub fn push_scancode(&mut self, code: Scancode, count: usize) {
        for _ in 0..count {
            if self.scancodes.push_back(code).is_err() {
                break;
            }
        }
    }

    /// Queue `count` consecutive button-level samples.
    pub fn push_levels(&mut self, levels: ButtonLevels, count: usize) {
        for _ in 0..count {
            if self.levels.push_back(levels).is_err() {
                break;
            }
        }
    }

    /// Hold `code` from now on, discarding any queued scancode samples.
    pub fn hold_scancode(&mut self, code: Scancode) {
        self.scancodes.clear();
        self.last_scancode = code;
    }

    /// Hold `levels` from now on, discarding any queued level samples.
    pub fn hold_levels(&mut self, levels: ButtonLevels) {
        self.levels.clear();
        self.last_levels = levels;
    }
}

impl Default for MockRawInput {
    fn default() -> Self {
        Self::new()
    }
}

impl RawInput for MockRawInput {
    fn read_key_scancode(&mut self) -> Scancode {
        if let Some(code) = self.scancodes.pop_front() {
            self.last_scancode = code;
        }
        self.last_scancode
    }

    fn read_button_levels(&mut self) -> ButtonLevels {
        if let Some(levels) = self.levels.pop_front() {
            self.last_levels = levels;
        }
        self.last_levels
    }
}

/// Mock tone player, records every requested tone.
pub struct MockTonePlayer {
    played: heapless::Vec<Tone, 64>,
}

impl MockTonePlayer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            played: heapless::Vec::new(),
        }
    }

    /// Tones played so far, oldest first.
    pub fn played(&self) -> &[Tone] {
        &self.played
    }

    /// Most recent tone.
    pub fn last(&self) -> Option<Tone> {
        self.played.last().copied()
    }

    /// Forget recorded tones.
    pub fn clear(&mut self) {
        self.played.clear();
    }
}

impl Default for MockTonePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl TonePlayer for MockTonePlayer {
    fn play(&mut self, tone: Tone) {
        // Recorder full: keep the oldest tones, tests only look at the start.
        let _ = self.played.push(tone);
    }
}

/// Mock backlight, counts wake requests.
#[derive(Default)]
pub struct MockBacklight {
    wakes: usize,
}

impl MockBacklight {
    /// Create a backlight that has never been woken.
    pub fn new() -> Self {
        Self { wakes: 0 }
    }

    /// Number of wake requests.
    pub fn wake_count(&self) -> usize {
        self.wakes
    }
}

impl Backlight for MockBacklight {
    fn wake(&mut self) {
        self.wakes = self.wakes.saturating_add(1);
    }
}

/// Mock settings store with mutable keypad timings.
#[derive(Default)]
pub struct MockSettings {
    /// Timings returned by [`SettingsStore::keypad_timings`].
    pub timings: KeypadTimings,
}

impl SettingsStore for MockSettings {
    fn keypad_timings(&self) -> KeypadTimings {
        self.timings
    }
}
