//! Application configuration and constants
//!
//! Central timing and sizing values shared by the input classifier and the
//! menu navigator. Everything here is expressed in UI ticks; the firmware
//! drives one tick per [`TICK_PERIOD_MS`].

/// Period of the UI tick in milliseconds.
pub const TICK_PERIOD_MS: u64 = 1;

/// Consecutive ticks a scancode must stay stable before it is accepted.
///
/// The keyboard accepts the candidate once the counter *exceeds* this value.
pub const KEY_DEBOUNCE_TICKS: u16 = 20;

/// Window in which re-pressing the same key advances the multi-tap character.
pub const ALPHA_TIMEOUT_TICKS: u32 = 1000;

/// Ticks a replayed quick-key action stays applied without confirmation.
pub const QUICK_KEY_REVERT_TICKS: u32 = 1000;

/// Ticks per keypad timer setting unit (settings are stored in 100 ms units).
pub const TIMER_UNIT_TICKS: u32 = 100;

/// Capacity of the menu navigation stack, root included.
pub const MENU_STACK_DEPTH: usize = 16;

/// Number of digit keys that can carry a quick-key binding.
pub const QUICK_KEY_SLOTS: usize = 10;
