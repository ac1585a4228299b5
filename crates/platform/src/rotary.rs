//! Quadrature rotary encoder state shared between the edge interrupt and the
//! UI poll loop.
//!
//! The interrupt side calls [`RotaryEncoder::on_edge`] with the level of both
//! encoder lines on every edge. The poll side calls [`RotaryEncoder::take`]
//! once per tick, which reads and clears the accumulated movement inside one
//! critical section, so a detent is reported exactly once.
//!
//! # Decoding
//!
//! Lines A/B form a 2-bit Gray code `00 → 01 → 11 → 10 → 00` for clockwise
//! rotation. Quarter steps are accumulated and a detent is registered when the
//! encoder returns to its rest phase (`11`, both lines pulled high) with at
//! least half a cycle of net movement. Contact bounce produces +1/−1 pairs that
//! cancel out.

use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Direction of one encoder detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotaryDirection {
    /// Clockwise
    Increment,
    /// Counter-clockwise
    Decrement,
}

/// Movement consumed by one [`RotaryEncoder::take`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotaryTurn {
    /// Direction of the most recent detent.
    pub direction: RotaryDirection,
    /// Net detents since the previous `take` (positive = clockwise).
    pub steps: i32,
}

/// Phase both lines rest in between detents.
const REST_PHASE: u8 = 0b11;

/// Quarter-step delta indexed by `previous_phase << 2 | next_phase`.
/// Invalid (double) transitions decode as zero.
const TRANSITIONS: [i8; 16] = [
    0, 1, -1, 0, //
    -1, 0, 0, 1, //
    1, 0, 0, -1, //
    0, -1, 1, 0,
];

#[derive(Clone, Copy)]
struct Shared {
    phase: u8,
    quarter_steps: i8,
    position: i32,
    last: Option<RotaryDirection>,
}

impl Shared {
    const fn new() -> Self {
        Self {
            phase: REST_PHASE,
            quarter_steps: 0,
            position: 0,
            last: None,
        }
    }
}

/// Encoder state, written from the EXTI interrupt and drained by the UI tick.
///
/// Intended to live in a `static`:
///
/// ```no_run
/// use platform::RotaryEncoder;
///
/// static ROTARY: RotaryEncoder = RotaryEncoder::new();
/// ```
pub struct RotaryEncoder {
    // CriticalSectionRawMutex: the writer is an interrupt, so the reader must
    // mask it for the few instructions of the read-and-clear.
    shared: Mutex<CriticalSectionRawMutex, Cell<Shared>>,
}

impl RotaryEncoder {
    /// Create an encoder at rest with no pending movement.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shared: Mutex::new(Cell::new(Shared::new())),
        }
    }

    /// Record an edge on either encoder line.
    ///
    /// `a` / `b` are the current levels (true = high) of lines A and B.
    pub fn on_edge(&self, a: bool, b: bool) {
        let next = (u8::from(a) << 1) | u8::from(b);
        self.shared.lock(|cell| {
            let mut s = cell.get();
            let index = usize::from((s.phase << 2) | next);
            let delta = TRANSITIONS.get(index).copied().unwrap_or(0);
            s.quarter_steps = s.quarter_steps.saturating_add(delta);
            s.phase = next;

            if next == REST_PHASE {
                if s.quarter_steps >= 2 {
                    s.position = s.position.wrapping_add(1);
                    s.last = Some(RotaryDirection::Increment);
                } else if s.quarter_steps <= -2 {
                    s.position = s.position.wrapping_sub(1);
                    s.last = Some(RotaryDirection::Decrement);
                }
                s.quarter_steps = 0;
            }
            cell.set(s);
        });
    }

    /// Read and clear any movement recorded since the previous call.
    ///
    /// Returns `None` when no detent completed. The read and the clear happen
    /// inside a single critical section.
    pub fn take(&self) -> Option<RotaryTurn> {
        self.shared.lock(|cell| {
            let mut s = cell.get();
            let turn = s.last.map(|direction| RotaryTurn {
                direction,
                steps: s.position,
            });
            s.last = None;
            s.position = 0;
            cell.set(s);
            turn
        })
    }

    /// Net detents pending since the previous [`take`](Self::take), without
    /// consuming them.
    pub fn pending_steps(&self) -> i32 {
        self.shared.lock(|cell| cell.get().position)
    }
}

impl Default for RotaryEncoder {
    fn default() -> Self {
        Self::new()
    }
}
