#![no_main]
#![no_std]

use tren_firmware as _; // global logger + panicking-behavior

#[rtic::app(device = stm32h7xx_hal::pac, peripherals = true, dispatchers = [EXTI0, EXTI1])]
mod app {
    use fugit::ExtU64;
    use systick_monotonic::Systick;

    use stm32h7xx_hal::pac::TIM2;
    use stm32h7xx_hal::timer::Timer;

    use tren_control::Store;
    use tren_firmware::system::inputs::Keypad;
    use tren_firmware::system::outputs::{Display, PulseOutput};
    use tren_firmware::system::System;

    /// How often the keypad matrix is walked.
    const SCAN_INTERVAL_MS: u64 = 2;
    /// How often the display is redrawn.
    const RENDER_INTERVAL_MS: u64 = 100;
    /// Blink cadence of the display, half on and half off.
    const BLINK_PERIOD_MS: u64 = 1000;

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>; // 1 kHz / 1 ms granularity

    #[shared]
    struct Shared {
        store: Store,
    }

    #[local]
    struct Local {
        tick_timer: Timer<TIM2>,
        pulse: PulseOutput,
        keypad: Keypad,
        display: Display,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("INIT");

        let system = System::init(cx.core, cx.device);

        scan::spawn().unwrap();
        render::spawn().unwrap();

        (
            Shared {
                store: Store::new(),
            },
            Local {
                tick_timer: system.tick_timer,
                pulse: system.pulse,
                keypad: system.keypad,
                display: system.display,
            },
            init::Monotonics(system.mono),
        )
    }

    /// The 100 ms time base of pulse generation.
    ///
    /// Runs at the highest priority so a tick is never delayed by the
    /// foreground. The pulse width hold is a bounded busy wait three
    /// orders of magnitude shorter than the tick interval.
    #[task(binds = TIM2, shared = [store], local = [tick_timer, pulse], priority = 3)]
    fn tick(mut cx: tick::Context) {
        cx.local.tick_timer.clear_irq();
        let pulse = cx.shared.store.lock(|store| store.on_tick());
        if let Some(pulse) = pulse {
            cx.local.pulse.emit(pulse.width_us);
        }
    }

    /// Keypad scanning, forwarding at most one key event per pass.
    #[task(shared = [store], local = [keypad], priority = 2)]
    fn scan(mut cx: scan::Context) {
        if let Some(key) = cx.local.keypad.scan() {
            defmt::info!("KEY: {:?}", key);
            cx.shared.store.lock(|store| store.apply_key(key));
        }
        scan::spawn_after(SCAN_INTERVAL_MS.millis()).unwrap();
    }

    /// Periodic display refresh.
    ///
    /// The blink phase is derived from the monotonic; the control crate
    /// treats it as purely cosmetic input.
    #[task(shared = [store], local = [display], priority = 1)]
    fn render(mut cx: render::Context) {
        let now_ms = monotonics::now().ticks();
        let blink_on = now_ms % BLINK_PERIOD_MS < BLINK_PERIOD_MS / 2;

        let view = cx.shared.store.lock(|store| store.view());
        let frame = tren_control::display::render(&view, blink_on);
        cx.local.display.draw(&frame);

        render::spawn_after(RENDER_INTERVAL_MS.millis()).unwrap();
    }
}
