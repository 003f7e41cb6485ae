//! Hardware abstraction of the generator board.
//!
//! The board is an STM32H750 with a 4x4 matrix keypad, a 20x4 character
//! display, and a single pulse output pin. The time base is TIM2, firing
//! an interrupt every 100 ms; the pulse width itself is held with a cycle
//! counted busy wait well below that interval.

pub mod inputs;
pub mod outputs;

pub use stm32h7xx_hal as hal;

use hal::pac::{CorePeripherals, Peripherals as DevicePeripherals, TIM2};
use hal::prelude::*;
use hal::timer::{Event, Timer};
use systick_monotonic::Systick;

use inputs::keypad::{Keypad, Pins as KeypadPins};
use outputs::display::{Display, Pins as DisplayPins};
use outputs::pulse::PulseOutput;

/// Core clock the firmware is configured to run on.
pub const CORE_CLOCK_HZ: u32 = 480_000_000;

pub struct System {
    pub mono: Systick<1000>,
    /// The 100 ms time base. Its interrupt drives the engine.
    pub tick_timer: Timer<TIM2>,
    pub keypad: Keypad,
    pub display: Display,
    pub pulse: PulseOutput,
}

impl System {
    /// Initialize system abstraction.
    ///
    /// # Panics
    ///
    /// The system can be initialized only once. It panics otherwise.
    #[must_use]
    pub fn init(cp: CorePeripherals, dp: DevicePeripherals) -> Self {
        let pwr = dp.PWR.constrain();
        let pwrcfg = pwr.freeze();
        let rcc = dp.RCC.constrain();
        let ccdr = rcc.sys_ck(480.MHz()).freeze(pwrcfg, &dp.SYSCFG);

        let gpioa = dp.GPIOA.split(ccdr.peripheral.GPIOA);
        let gpiob = dp.GPIOB.split(ccdr.peripheral.GPIOB);
        let gpioc = dp.GPIOC.split(ccdr.peripheral.GPIOC);

        let mut tick_timer = dp.TIM2.timer(
            (1000 / tren_control::TICK_INTERVAL_MS).Hz(),
            ccdr.peripheral.TIM2,
            &ccdr.clocks,
        );
        tick_timer.listen(Event::TimeOut);

        let mono = Systick::new(cp.SYST, CORE_CLOCK_HZ);

        let keypad = Keypad::new(KeypadPins {
            rows: [
                gpiob.pb0.into_pull_up_input().erase(),
                gpiob.pb1.into_pull_up_input().erase(),
                gpiob.pb2.into_pull_up_input().erase(),
                gpiob.pb3.into_pull_up_input().erase(),
            ],
            columns: [
                gpiob.pb4.into_push_pull_output().erase(),
                gpiob.pb5.into_push_pull_output().erase(),
                gpiob.pb6.into_push_pull_output().erase(),
                gpiob.pb7.into_push_pull_output().erase(),
            ],
        });

        let display = Display::new(DisplayPins {
            rs: gpioa.pa0.into_push_pull_output().erase(),
            en: gpioa.pa1.into_push_pull_output().erase(),
            data: [
                gpioa.pa2.into_push_pull_output().erase(),
                gpioa.pa3.into_push_pull_output().erase(),
                gpioa.pa4.into_push_pull_output().erase(),
                gpioa.pa5.into_push_pull_output().erase(),
            ],
        });

        let pulse = PulseOutput::new(gpioc.pc13.into_push_pull_output().erase());

        Self {
            mono,
            tick_timer,
            keypad,
            display,
            pulse,
        }
    }
}
