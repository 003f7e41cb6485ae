#![no_std]
#![no_main]

use tren_firmware as _; // memory layout + panic handler

#[defmt_test::tests]
mod tests {
    use tren_control::{Key, Store};
    use tren_firmware::system::System;
    use tren_firmware::testlib::scan_until_key;

    #[init]
    fn init() -> System {
        let cp = cortex_m::Peripherals::take().unwrap();
        let dp = stm32h7xx_hal::pac::Peripherals::take().unwrap();

        System::init(cp, dp)
    }

    #[test]
    fn pulse_output_emits_a_burst_of_four(system: &mut System) {
        const MS: u32 = tren_firmware::system::CORE_CLOCK_HZ / 1000;

        defmt::info!("Connect a scope to the pulse output, then press A");
        scan_until_key(&mut system.keypad, Key::StartStop);

        defmt::info!("Press A and confirm 4 pulses of 10 us, 1 second apart");
        scan_until_key(&mut system.keypad, Key::StartStop);
        for _ in 0..4 {
            system.pulse.emit(10);
            cortex_m::asm::delay(1000 * MS);
        }

        defmt::info!("Press A to end this test");
        scan_until_key(&mut system.keypad, Key::StartStop);
    }

    #[test]
    fn engine_driven_burst_respects_the_programmed_count(system: &mut System) {
        const TICK_MS: u32 = tren_control::TICK_INTERVAL_MS;
        const MS: u32 = tren_firmware::system::CORE_CLOCK_HZ / 1000;

        defmt::info!("Press A and confirm exactly 3 pulses, then silence");
        scan_until_key(&mut system.keypad, Key::StartStop);

        let mut store = Store::new();
        for key in [
            Key::EnterMenu,
            Key::Digit(1),
            Key::Digit(3),
            Key::Return,
            Key::Return,
            Key::StartStop,
        ] {
            store.apply_key(key);
        }

        // Two full bursts worth of software ticks; only the first burst
        // may produce output.
        for _ in 0..60 {
            if let Some(pulse) = store.on_tick() {
                system.pulse.emit(pulse.width_us);
            }
            cortex_m::asm::delay(TICK_MS * MS);
        }

        defmt::info!("Press A to end this test");
        scan_until_key(&mut system.keypad, Key::StartStop);
    }
}
