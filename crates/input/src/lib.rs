//! Debounce & event classifier for the keypad matrix and side buttons.
//!
//! Turns raw samples from a [`platform::RawInput`] into discrete key and
//! button events, one call per UI tick:
//!
//! - [`ButtonClassifier`] - PTT / SK1 / SK2 short, long and extra-long presses
//! - [`Keyboard`] - matrix debounce, long press, auto-repeat, rotary priority
//!   and the alpha multi-tap overlay
//!
//! Both are plain context objects. Nothing here is `static`; the firmware owns
//! one instance of each and hands them the samples.
//!
//! # Example
//!
//! ```
//! use input::{Keyboard, KeyModifiers};
//! use platform::{KeypadTimings, Scancode};
//!
//! let mut kb = Keyboard::new();
//! let timings = KeypadTimings::DEFAULT;
//! let mut presses = 0;
//! for _ in 0..30 {
//!     let poll = kb.poll(Scancode::new(6), None, timings);
//!     if poll.event.modifiers.contains(KeyModifiers::PRESS) {
//!         presses += 1;
//!     }
//! }
//! assert_eq!(presses, 1);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alpha;
pub mod buttons;
pub mod key;
pub mod keyboard;
pub mod keymap;
pub mod timer;

pub use buttons::{ButtonClassifier, ButtonEvent, ButtonMask, ButtonPoll};
pub use key::{EventSignal, Key, KeyEvent, KeyModifiers};
pub use keyboard::{KeyPoll, KeyState, Keyboard};
pub use timer::Countdown;
