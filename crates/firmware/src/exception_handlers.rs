//! Cortex-M exception handlers.
//!
//! The `#[cortex_m_rt::exception]` attribute needs the ARM target, so the
//! handler is gated behind `hardware`. The module itself always compiles so
//! host tests can check it is linked in.

#![allow(clippy::doc_markdown)]
/// Marker checked by the architecture tests.
pub const HARDFAULT_DEFINED: bool = true;

/// HardFault handler (hardware target only).
///
/// Logs the stacked exception frame address over RTT and halts. Returning
/// from a HardFault is undefined behaviour, hence `-> !`.
#[cfg(feature = "hardware")]
#[cortex_m_rt::exception]
#[allow(unsafe_code)]
unsafe fn HardFault(ef: &cortex_m_rt::ExceptionFrame) -> ! {
    defmt::panic!(
        "HardFault! Stacked exception frame at 0x{:08X}. Check stacked PC for fault address.",
        ef as *const _ as u32
    );
}
