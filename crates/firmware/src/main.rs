//! Handheld transceiver UI firmware - main entry point
//!
//! Hardware-only entry point for STM32F405VG.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_futures::select::select;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pull, Speed};
use embassy_stm32::peripherals::IWDG;
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_time::{Delay, Duration, Ticker};
use platform::config::TICK_PERIOD_MS;
use platform::{KeypadTimings, RotaryEncoder};
use ui::Navigator;

use firmware::boot::{self, WATCHDOG_PET_TICKS};
use firmware::screens::{self, Radio, Screens};
use firmware::{BacklightPin, Beeper, Devices, HardwareInput, InputPipeline, MatrixScanner, SideButtons};

use defmt_rtt as _;
use panic_probe as _;

/// Encoder state shared between the EXTI task and the UI tick.
static ROTARY: RotaryEncoder = RotaryEncoder::new();

type OutPin = Output<'static, AnyPin>;
type InPin = Input<'static, AnyPin>;
type Keypad = HardwareInput<OutPin, InPin, Delay, InPin>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("Handheld UI firmware v{=str}", env!("CARGO_PKG_VERSION"));
    defmt::info!("Initializing STM32F405VG @ {=u32} Hz", boot::SYSCLK_HZ);

    let p = embassy_stm32::init(boot::build_embassy_config());

    // The IWDG cannot be stopped once unleashed: the UI task must pet it.
    let mut watchdog = IndependentWatchdog::new(p.IWDG, boot::watchdog_timeout_us());
    watchdog.unleash();
    defmt::info!("IWDG armed: timeout={=u32}ms", boot::WATCHDOG_TIMEOUT_MS);

    // -----------------------------------------------------------------------
    // Pin assignments
    //
    //   PD0 PD1 PD4 PD5 PD6 = keypad rows (push-pull, idle high)
    //   PE2 PE3 PE4 PE5     = keypad columns (pull-up)
    //   PE11                = PTT   (active-low, pull-up)
    //   PD13                = SK1   (active-low, pull-up)
    //   PE12                = SK2   (active-low, pull-up)
    //   PE14 / PB11         = encoder A / B (EXTI14 / EXTI11)
    //   PA7                 = piezo gate
    //   PD8                 = LCD backlight enable
    // -----------------------------------------------------------------------
    let rows = [
        Output::new(p.PD0, Level::High, Speed::Low).degrade(),
        Output::new(p.PD1, Level::High, Speed::Low).degrade(),
        Output::new(p.PD4, Level::High, Speed::Low).degrade(),
        Output::new(p.PD5, Level::High, Speed::Low).degrade(),
        Output::new(p.PD6, Level::High, Speed::Low).degrade(),
    ];
    let cols = [
        Input::new(p.PE2, Pull::Up).degrade(),
        Input::new(p.PE3, Pull::Up).degrade(),
        Input::new(p.PE4, Pull::Up).degrade(),
        Input::new(p.PE5, Pull::Up).degrade(),
    ];
    let buttons = SideButtons {
        ptt: Input::new(p.PE11, Pull::Up).degrade(),
        sk1: Input::new(p.PD13, Pull::Up).degrade(),
        sk2: Input::new(p.PE12, Pull::Up).degrade(),
    };
    let input = HardwareInput::new(MatrixScanner::new(rows, cols, Delay), buttons);

    let beeper = Beeper::new(Output::new(p.PA7, Level::Low, Speed::Low).degrade());
    let backlight = BacklightPin::new(Output::new(p.PD8, Level::Low, Speed::Low).degrade());

    let enc_a: ExtiInput<'static, AnyPin> =
        ExtiInput::new(Input::new(p.PE14, Pull::Up).degrade(), p.EXTI14.degrade());
    let enc_b: ExtiInput<'static, AnyPin> =
        ExtiInput::new(Input::new(p.PB11, Pull::Up).degrade(), p.EXTI11.degrade());

    defmt::unwrap!(spawner.spawn(rotary_task(enc_a, enc_b)));
    defmt::info!("Rotary task spawned");

    defmt::unwrap!(spawner.spawn(ui_task(input, beeper, backlight, watchdog)));
    defmt::info!("UI task spawned: tick={=u64}ms", TICK_PERIOD_MS);
}

/// Feed every encoder edge to the quadrature decoder.
#[embassy_executor::task]
async fn rotary_task(mut a: ExtiInput<'static, AnyPin>, mut b: ExtiInput<'static, AnyPin>) {
    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
        ROTARY.on_edge(a.is_high(), b.is_high());
    }
}

/// 1 ms UI tick: sample, classify, navigate, give feedback.
#[embassy_executor::task]
async fn ui_task(
    input: Keypad,
    beeper: Beeper<OutPin>,
    backlight: BacklightPin<OutPin>,
    mut watchdog: IndependentWatchdog<'static, IWDG>,
) {
    let mut demo = Screens::new();
    let mut radio = Radio::new();

    let registry = match demo.registry() {
        Ok(registry) => registry,
        Err(e) => {
            defmt::error!("screen registry: {}", e);
            return;
        }
    };
    let mut nav = match Navigator::new(registry, screens::HOME) {
        Ok(nav) => nav,
        Err(e) => {
            defmt::error!("navigator: {}", e);
            return;
        }
    };
    nav.start(&mut radio);

    let mut pipeline = InputPipeline::new();
    let mut devices = Devices {
        input,
        settings: KeypadTimings::DEFAULT,
        tones: beeper,
        backlight,
    };

    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        pipeline.tick(&mut nav, &mut radio, &mut devices, &ROTARY);
        devices.tones.tick();
        devices.backlight.tick();

        if pipeline.time().checked_rem(WATCHDOG_PET_TICKS) == Some(0) {
            watchdog.pet();
        }
        ticker.next().await;
    }
}
