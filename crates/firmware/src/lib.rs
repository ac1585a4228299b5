//! Handheld transceiver UI firmware.
//!
//! Glues the input classifier and the menu navigator to the STM32F405
//! hardware. Everything except `main.rs` builds on the host.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs, screens)
//!         ↓
//! Tick pipeline (pipeline)
//!         ↓
//! Feature Layers (input classifier, ui navigator)
//!         ↓
//! Drivers (matrix sampler, beeper, backlight) over embedded-hal
//!         ↓
//! Platform HAL (Embassy, STM32)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for the STM32F405 target (embassy, defmt-rtt)
//! - `defmt` - defmt derives and logging in every layer
//!
//! # Example
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::await_holding_lock)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)]
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

pub mod boot;
pub mod exception_handlers;
pub mod matrix;
pub mod pipeline;
pub mod screens;
pub mod sinks;

pub use matrix::{HardwareInput, MatrixError, MatrixScanner, SideButtons};
pub use pipeline::{Devices, InputPipeline};
pub use screens::{HomeScreen, NameEntryScreen, OptionsScreen, Radio, Screens};
pub use sinks::{BacklightPin, Beeper};
