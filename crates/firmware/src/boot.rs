//! Hardware boot sequence for the handheld.
//!
//! Initialization order:
//!   1. Clocks: HSE 8 MHz through PLL to a 168 MHz system clock
//!   2. IWDG armed before any task is spawned
//!   3. Keypad matrix rows driven high, columns and side buttons pulled up
//!   4. Rotary encoder EXTI task
//!   5. 1 ms UI tick task
//!
//! Clock arithmetic lives in plain `const`s so host tests can check it.

/// Ordered list of boot steps, checked by the boot tests.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. Clocks: HSE 8 MHz -> PLL -> 168 MHz SYSCLK",
    "2. IWDG: armed before tasks start",
    "3. GPIO: keypad rows idle high, columns and side buttons pulled up",
    "4. EXTI: rotary encoder task",
    "5. UI: 1 ms tick task (sample, classify, navigate, feedback)",
];

/// External crystal.
pub const HSE_HZ: u32 = 8_000_000;
/// PLL input divider (PLLM).
pub const PLL_PREDIV: u32 = 4;
/// PLL multiplier (PLLN).
pub const PLL_MUL: u32 = 168;
/// System clock divider (PLLP).
pub const PLL_DIVP: u32 = 2;
/// 48 MHz domain divider (PLLQ).
pub const PLL_DIVQ: u32 = 7;

/// Resulting system clock.
pub const SYSCLK_HZ: u32 = HSE_HZ / PLL_PREDIV * PLL_MUL / PLL_DIVP;
/// Resulting USB / SDIO clock.
pub const PLL48_HZ: u32 = HSE_HZ / PLL_PREDIV * PLL_MUL / PLL_DIVQ;

/// Watchdog timeout. The UI task pets it every [`WATCHDOG_PET_TICKS`].
pub const WATCHDOG_TIMEOUT_MS: u32 = 1_000;
/// UI ticks between watchdog pets.
pub const WATCHDOG_PET_TICKS: u32 = 100;

/// Embassy configuration for the STM32F405 clock tree.
#[cfg(feature = "hardware")]
pub fn build_embassy_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::{
        AHBPrescaler, APBPrescaler, Hse, HseMode, Pll, PllMul, PllPDiv, PllPreDiv, PllQDiv,
        PllSource, Sysclk,
    };
    use embassy_stm32::time::Hertz;

    let mut config = embassy_stm32::Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(HSE_HZ),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll_src = PllSource::HSE;
    config.rcc.pll = Some(Pll {
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL168,
        divp: Some(PllPDiv::DIV2), // 168 MHz
        divq: Some(PllQDiv::DIV7), // 48 MHz
        divr: None,
    });
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV4; // 42 MHz
    config.rcc.apb2_pre = APBPrescaler::DIV2; // 84 MHz
    config.rcc.sys = Sysclk::PLL1_P;
    config
}

/// Watchdog timeout in the microseconds the IWDG driver expects.
pub const fn watchdog_timeout_us() -> u32 {
    WATCHDOG_TIMEOUT_MS.saturating_mul(1_000)
}
