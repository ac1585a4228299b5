//! Menu stack navigator: screen contract, registry, navigation stack, quick
//! keys and audio cue selection.
//!
//! This crate is `no_std` by default; it only uses `core` + `heapless`.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod event;
pub mod navigation;
pub mod quick_keys;
pub mod screen;
pub mod status;

pub use event::{EventSources, UiEvent};
pub use navigation::{Context, ExitCallback, NavRequest, Navigator, TickOutcome};
pub use quick_keys::{QuickKeyBinding, QuickKeys};
pub use screen::{Registry, RegistryError, RotaryMapping, Screen, ScreenId};
pub use status::{select_tone, MenuStatus, QsoFlags};
