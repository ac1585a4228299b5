//! Hardware Abstraction Layer (HAL) for the handheld transceiver UI core.
//!
//! This crate provides the contracts the input classifier and the menu
//! navigator are written against, so both can be developed and tested without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: tick task, screens)
//!         ↓
//! Feature Layers (input classifier, ui navigator)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Contracts
//!
//! - [`RawInput`] - keypad-matrix scancode and side-button level sampler
//! - [`RotaryEncoder`] - quadrature state shared with the edge interrupt
//! - [`SettingsStore`] - read-only keypad timing configuration
//! - [`TonePlayer`] - audible feedback sink
//! - [`Backlight`] - display backlight wake requests
//!
//! # Features
//!
//! - `std`: Enable host mocks (for testing)
//! - `hardware`: Physical hardware marker
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{RawInput, Scancode};
//!
//! fn any_key_down<I: RawInput>(input: &mut I) -> bool {
//!     input.read_key_scancode() != Scancode::NONE
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // pin and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod backlight;
pub mod config;
pub mod input;
pub mod rotary;
pub mod settings;
pub mod sound;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use backlight::Backlight;
pub use input::{Button, ButtonLevels, RawInput, Scancode};
pub use rotary::{RotaryDirection, RotaryEncoder, RotaryTurn};
pub use settings::{KeypadTimings, OutOfRangeError, SettingsStore};
pub use sound::{Tone, TonePlayer};
